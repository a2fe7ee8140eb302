//! Side panel showing the controller's internal state: hero engine state,
//! progress gauge, accumulator, lock, tab sync and reveal count.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::app::controller::ControllerSnapshot;
use crate::constants::{MAX_PROGRESS, WHEEL_STEP_THRESHOLD};

use super::theme::Theme;

const GAUGE_WIDTH: usize = 20;

pub struct InspectorWidget<'a> {
    pub block: Block<'a>,
    pub snapshot: &'a ControllerSnapshot,
    pub scroll_y: f64,
    pub viewport_height: f64,
}

impl Widget for InspectorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }
        Paragraph::new(inspector_lines(self.snapshot, self.scroll_y, self.viewport_height))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

pub fn inspector_lines(snap: &ControllerSnapshot, scroll_y: f64, viewport_height: f64) -> Vec<Line<'static>> {
    let progress = snap.progress.value();
    let mut lines = vec![
        kv_line("state", snap.hero_state),
        Line::from(vec![
            Span::styled(format!("{:<12}", "progress"), Theme::label_style()),
            Span::styled(format!("{progress:.1}"), Theme::value_style()),
            Span::raw(format!(" / {MAX_PROGRESS:.1}")),
        ]),
        Line::from(Span::styled(gauge(progress / MAX_PROGRESS), Theme::indicator_style())),
        kv_line(
            "wheel acc",
            &format!("{:+.0} / {WHEEL_STEP_THRESHOLD:.0}", snap.accumulator),
        ),
    ];
    if snap.locked {
        lines.push(Line::from(Span::styled("⏸ scroll locked", Theme::locked_style())));
    }
    lines.push(kv_line("hero passed", if snap.has_passed_hero { "yes" } else { "no" }));
    lines.push(Line::default());
    lines.push(kv_line("scroll y", &format!("{scroll_y:.0} px")));
    lines.push(kv_line("viewport", &format!("{viewport_height:.0} px")));
    lines.push(Line::default());
    lines.push(kv_line("tab", snap.current_tab.map_or("-", |t| t.label())));
    lines.push(kv_line("docked", if snap.docked { "yes" } else { "no" }));
    if let Some(ind) = snap.indicator {
        lines.push(kv_line(
            "indicator",
            &format!("{:.0}+{:.0}", ind.offset_left, ind.width),
        ));
    }
    lines.push(kv_line("reveals left", &snap.pending_reveals.to_string()));
    if snap.disposed {
        lines.push(Line::from(Span::styled("disposed", Theme::locked_style())));
    }
    lines
}

fn gauge(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round()) as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

fn kv_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Theme::label_style()),
        Span::styled(value.to_string(), Theme::value_style()),
    ])
}
