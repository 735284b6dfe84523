use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Rect;
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;

use menuforge::canvas::CanvasFrame;
use menuforge::designer::Designer;
use menuforge::event_loop::{ControlFlow, EventLoop};
use menuforge::keybindings::{Action, KeyBindings};
use menuforge::theme::{self, Skin};
use menuforge::tree::{MenuTree, TreeError};

/// Two-line key reference shown under the canvas, derived from the live
/// bindings table so rebinding a key updates the hint text with it.
fn footer_text(bindings: &KeyBindings) -> String {
    let combos = |action| bindings.combos_for(action).join("/");
    format!(
        indoc! {"
            {}/{} navigate · {} enters a submenu · {} rename · {}/{} cycle siblings
            drag with the mouse to rearrange · {} removes · {} quits"},
        combos(Action::SelectNext),
        combos(Action::SelectPrev),
        combos(Action::NavRight),
        combos(Action::EditLabel),
        combos(Action::SiblingCycleNext),
        combos(Action::SiblingCyclePrev),
        combos(Action::DeleteNode),
        combos(Action::Quit),
    )
}

#[derive(Debug, Parser)]
#[command(name = "menuforge", about = "Visual designer for application menu bars")]
struct Args {
    /// Look-and-feel metrics for icon/accelerator gutters.
    #[arg(long, value_enum, default_value = "plain")]
    skin: Skin,
    /// Poll interval of the event loop, in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> io::Result<()> {
    menuforge::tracing_sub::init_default();
    let args = Args::parse();
    let tree = sample_menu().map_err(io::Error::other)?;
    let mut designer = Designer::new(tree, args.skin);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut designer, args.tick_ms);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    designer: &mut Designer,
    tick_ms: u64,
) -> io::Result<()> {
    let mut dirty = true;
    let footer = footer_text(designer.bindings());
    EventLoop::new(Duration::from_millis(tick_ms)).run(|event| {
        match event {
            Some(Event::Key(key)) => {
                if designer.bindings().matches(Action::Quit, &key) {
                    return Ok(ControlFlow::Quit);
                }
                designer.handle_event(&Event::Key(key));
            }
            Some(Event::Resize(_, _)) => dirty = true,
            Some(other) => {
                designer.handle_event(&other);
            }
            None => {
                // redraw tick
                if designer.take_repaint() || dirty {
                    dirty = false;
                    terminal.draw(|frame| {
                        let area = frame.area();
                        let footer_height = 2u16.min(area.height);
                        let canvas = Rect::new(
                            area.x,
                            area.y,
                            area.width,
                            area.height.saturating_sub(footer_height),
                        );
                        let mut canvas_frame = CanvasFrame::new(frame);
                        designer.render(&mut canvas_frame, canvas);
                        let footer_area = Rect::new(
                            area.x,
                            area.y.saturating_add(canvas.height),
                            area.width,
                            footer_height,
                        );
                        canvas_frame.render_widget(
                            Paragraph::new(Text::raw(footer.as_str()))
                                .style(Style::default().fg(theme::panel_fg())),
                            footer_area,
                        );
                    })?;
                }
            }
        }
        Ok(ControlFlow::Continue)
    })
}

fn sample_menu() -> Result<MenuTree, TreeError> {
    let mut tree = MenuTree::new();
    let file = tree.add_menu(tree.root(), "File")?;
    tree.add_item(file, "New", true, Some("Ctrl+N"))?;
    tree.add_item(file, "Open", true, Some("Ctrl+O"))?;
    let recent = tree.add_menu(file, "Open Recent")?;
    tree.add_item(recent, "notes.txt", false, None)?;
    tree.add_item(recent, "todo.md", false, None)?;
    tree.add_separator(file)?;
    tree.add_item(file, "Save", true, Some("Ctrl+S"))?;
    tree.add_item(file, "Exit", false, Some("Ctrl+Q"))?;

    let edit = tree.add_menu(tree.root(), "Edit")?;
    tree.add_item(edit, "Cut", true, Some("Ctrl+X"))?;
    tree.add_item(edit, "Copy", true, Some("Ctrl+C"))?;
    tree.add_item(edit, "Paste", true, Some("Ctrl+V"))?;
    tree.add_separator(edit)?;
    tree.add_item(edit, "Find", false, Some("Ctrl+F"))?;

    let view = tree.add_menu(tree.root(), "View")?;
    tree.add_item(view, "Zoom In", false, Some("Ctrl++"))?;
    tree.add_item(view, "Zoom Out", false, Some("Ctrl+-"))?;

    let help = tree.add_menu(tree.root(), "Help")?;
    tree.add_item(help, "About", false, None)?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_reflects_the_bindings_table() {
        let text = footer_text(&KeyBindings::default());
        assert!(text.contains("Down/Up navigate"));
        assert!(text.contains("Space/F2 rename"));
        assert!(text.contains("A/Shift+A cycle siblings"));
        assert!(text.contains("Ctrl+Q quits"));
    }
}
