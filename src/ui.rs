//! Column rendering for the three lanes
//!
//! Pure drawing code: everything here is computed from a state snapshot plus
//! the frame clock's own readout, so the whole screen can be painted without
//! the main loop's involvement.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    colors::{theme, Color},
    state::LabSnapshot,
};

/// Glyph translated vertically inside each lane.
const BALL: &str = "●";

/// Values produced by the frame clock for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameReadout {
    /// Ping-pong position of the frame lane's ball.
    pub spin_pos: f64,
    /// Rotation angle derived from the ping-pong position.
    pub angle: u16,
    /// Dip offset of the worker lane's ball.
    pub dip_offset: f64,
    /// Mirrored completed-job count.
    pub jobs_done: u64,
}

/// Maps a position in `[0, bound]` to a row inside a track of `rows` rows.
/// Overshoot past either edge clamps to the nearest row.
pub fn row_for(pos: f64, bound: f64, rows: u16) -> u16 {
    if bound <= 0.0 || rows <= 1 {
        return 0;
    }
    let t = (pos / bound).clamp(0.0, 1.0);
    (t * (rows - 1) as f64).round() as u16
}

/// Paints the full screen: three lanes, the jam bar, and the legend.
pub fn draw(frame: &mut Frame<'_>, area: Rect, snap: &LabSnapshot, readout: &FrameReadout) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    draw_lanes(frame, rows[0], snap, readout);
    draw_jam_bar(frame, rows[1], snap.jammed);
    draw_legend(frame, rows[2]);
}

fn draw_lanes(frame: &mut Frame<'_>, area: Rect, snap: &LabSnapshot, readout: &FrameReadout) {
    let lanes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let main_accent = if snap.jammed {
        theme::lane::stalled(theme::lane::MAIN)
    } else {
        theme::lane::MAIN
    };
    let main_readout = if snap.jammed {
        "💀 jammed".to_string()
    } else {
        "🍎 responsive".to_string()
    };

    draw_lane(
        frame,
        lanes[0],
        "main loop",
        main_accent,
        snap.bounce_pos,
        snap.bound,
        &main_readout,
    );
    draw_lane(
        frame,
        lanes[1],
        "frame clock",
        theme::lane::FRAME,
        readout.spin_pos,
        snap.bound,
        &format!("{}°", readout.angle),
    );
    draw_lane(
        frame,
        lanes[2],
        "worker",
        theme::lane::WORKER,
        readout.dip_offset,
        snap.bound,
        &format!("{} jobs", readout.jobs_done),
    );
}

fn draw_lane(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    accent: Color,
    pos: f64,
    bound: f64,
    readout: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(accent.to_ratatui()))
        .style(Style::default().bg(theme::background::PANEL.to_ratatui()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    // Last inner row is the readout; the rest is the ball's track.
    let track_rows = inner.height - 1;
    let ball_row = row_for(pos, bound, track_rows);

    let ball_area = Rect::new(inner.x, inner.y + ball_row, inner.width, 1);
    frame.render_widget(
        Paragraph::new(BALL)
            .alignment(Alignment::Center)
            .style(Style::default().fg(accent.to_ratatui())),
        ball_area,
    );

    let readout_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    frame.render_widget(
        Paragraph::new(readout)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme::text::PRIMARY.to_ratatui())),
        readout_area,
    );
}

fn draw_jam_bar(frame: &mut Frame<'_>, area: Rect, jammed: bool) {
    let (label, bg) = if jammed {
        ("MAIN LOOP IS FROZEN", theme::jam::FROZEN)
    } else {
        ("[j] JAM THE MAIN LOOP", theme::jam::ARMED)
    };

    frame.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme::jam::LABEL.to_ratatui())
                    .bg(bg.to_ratatui())
                    .bold(),
            ),
        area,
    );
}

fn draw_legend(frame: &mut Frame<'_>, area: Rect) {
    let secondary = Style::default().fg(theme::text::SECONDARY.to_ratatui());
    let lines = vec![
        legend_line(
            theme::lane::MAIN,
            "main loop",
            "timer-driven bounce; freezes while the main loop is jammed",
        ),
        legend_line(
            theme::lane::FRAME,
            "frame clock",
            "eased ping-pong and live angle; unaffected by the jam",
        ),
        legend_line(
            theme::lane::WORKER,
            "worker",
            "background crunch every 1.5s; each finished job dips the ball",
        ),
        Line::from(Span::styled("[j] jam for 3 seconds    [q] quit", secondary)),
    ];

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme::background::BASE.to_ratatui())),
        area,
    );
}

fn legend_line(accent: Color, name: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", name),
            Style::default().fg(accent.to_ratatui()),
        ),
        Span::styled(
            what,
            Style::default().fg(theme::text::SECONDARY.to_ratatui()),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_text(snap: &LabSnapshot, readout: &FrameReadout) -> String {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, snap, readout);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for (i, cell) in buffer.content().iter().enumerate() {
            if i > 0 && i % width == 0 {
                text.push('\n');
            }
            text.push_str(cell.symbol());
        }
        text
    }

    fn readout() -> FrameReadout {
        FrameReadout {
            spin_pos: 125.0,
            angle: 180,
            dip_offset: 0.0,
            jobs_done: 4,
        }
    }

    #[test]
    fn test_row_for_endpoints() {
        assert_eq!(row_for(0.0, 250.0, 20), 0);
        assert_eq!(row_for(250.0, 250.0, 20), 19);
        assert_eq!(row_for(125.0, 250.0, 21), 10);
    }

    #[test]
    fn test_row_for_clamps_overshoot() {
        assert_eq!(row_for(-5.0, 250.0, 20), 0);
        assert_eq!(row_for(260.0, 250.0, 20), 19);
        assert_eq!(row_for(10.0, 0.0, 20), 0);
        assert_eq!(row_for(10.0, 250.0, 0), 0);
    }

    #[test]
    fn test_screen_shows_lanes_and_readouts() {
        let snap = LabSnapshot {
            running: true,
            jammed: false,
            bounce_pos: 0.0,
            bound: 250.0,
        };
        let text = render_to_text(&snap, &readout());

        assert!(text.contains("main loop"));
        assert!(text.contains("frame clock"));
        assert!(text.contains("worker"));
        assert!(text.contains("180°"));
        assert!(text.contains("4 jobs"));
        assert!(text.contains("[j] JAM THE MAIN LOOP"));
    }

    #[test]
    fn test_jam_bar_reflects_the_flag() {
        let snap = LabSnapshot {
            running: true,
            jammed: true,
            bounce_pos: 40.0,
            bound: 250.0,
        };
        let text = render_to_text(&snap, &readout());

        assert!(text.contains("MAIN LOOP IS FROZEN"));
        assert!(text.contains("jammed"));
        assert!(!text.contains("[j] JAM THE MAIN LOOP"));
    }
}
