//! Frame-level rendering checks: the painted buffer is the designer's only
//! output, so assertions go straight against its cells.

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;

use menuforge::canvas::CanvasFrame;
use menuforge::designer::Designer;
use menuforge::theme::{self, Skin};
use menuforge::tree::{MenuId, MenuTree};

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 60,
    height: 20,
};

fn paint(d: &mut Designer) -> Buffer {
    let mut buffer = Buffer::empty(AREA);
    let mut frame = CanvasFrame::from_parts(AREA, &mut buffer);
    d.render(&mut frame, AREA);
    buffer
}

fn designer() -> (Designer, MenuId, MenuId) {
    let mut tree = MenuTree::new();
    let file = tree.add_menu(tree.root(), "File").unwrap();
    tree.add_menu(tree.root(), "Edit").unwrap();
    let new = tree.add_item(file, "New", true, Some("Ctrl+N")).unwrap();
    tree.add_item(file, "Open", false, Some("Ctrl+O")).unwrap();
    let mut d = Designer::new(tree, Skin::Plain);
    let _ = paint(&mut d);
    (d, file, new)
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..AREA.width)
        .map(|x| buffer.cell((x, y)).unwrap().symbol())
        .collect()
}

fn click(d: &mut Designer, x: u16, y: u16) {
    for kind in [
        MouseEventKind::Down(MouseButton::Left),
        MouseEventKind::Up(MouseButton::Left),
    ] {
        d.handle_event(&Event::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }));
    }
}

#[test]
fn bar_titles_paint_on_the_top_row() {
    let (mut d, _file, _new) = designer();
    let buffer = paint(&mut d);
    let top = row_text(&buffer, 0);
    assert!(top.contains("File"));
    assert!(top.contains("Edit"));
}

#[test]
fn open_panel_paints_rows_with_accelerators() {
    let (mut d, file, new) = designer();
    let rect = d.tree().bounds(file);
    click(&mut d, rect.x + 1, rect.y);
    let buffer = paint(&mut d);

    let row = d.tree().bounds(new);
    let text = row_text(&buffer, row.y);
    assert!(text.contains("New"));
    assert!(text.contains("Ctrl+N"));
    // icon marker in the leading gutter
    assert_eq!(buffer.cell((row.x, row.y)).unwrap().symbol(), "•");
    // panel border above the first row
    assert_eq!(
        buffer
            .cell((row.x, row.y.saturating_sub(1)))
            .unwrap()
            .symbol(),
        "─"
    );
}

#[test]
fn clicking_the_icon_band_highlights_it() {
    let (mut d, file, new) = designer();
    let rect = d.tree().bounds(file);
    click(&mut d, rect.x + 1, rect.y);
    let _ = paint(&mut d);

    let row = d.tree().bounds(new);
    click(&mut d, row.x, row.y); // icon cell
    assert_eq!(
        d.state().portion(),
        menuforge::geometry::SelectedPortion::Icon
    );
    let buffer = paint(&mut d);
    assert_eq!(
        buffer.cell((row.x, row.y)).unwrap().style().bg,
        Some(theme::portion_highlight_bg())
    );
    // the text band is not part of the highlight
    assert_ne!(
        buffer.cell((row.x + 3, row.y)).unwrap().style().bg,
        Some(theme::portion_highlight_bg())
    );
}

#[test]
fn selected_bar_menu_is_tinted() {
    let (mut d, file, _new) = designer();
    let rect = d.tree().bounds(file);
    click(&mut d, rect.x + 1, rect.y);
    let buffer = paint(&mut d);
    assert_eq!(
        buffer.cell((rect.x + 1, rect.y)).unwrap().style().bg,
        Some(theme::bar_selected_bg())
    );
}
