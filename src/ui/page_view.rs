//! Ratatui widget that paints the simulated landing page at its current
//! scroll position, one terminal row per [`ROW_PX`] page pixels.
//!
//! Everything drawn here is read back from the page (layer offsets, hero
//! stage, tab state, revealed cards), so the picture shows exactly what the
//! controller wrote.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::app::controller::{Element, Page};
use crate::app::page::{tab_anchor_geometry, SimPage, TAB_BAR_HEIGHT};
use crate::core::{
    geometry::{Bounds, IndicatorGeometry},
    parallax::LAYER_COUNT,
    tabs::TabId,
};

use super::layout::{COL_PX, ROW_PX};
use super::theme::Theme;

/// Resting position of each parallax layer, as a fraction of hero height.
const LAYER_ANCHORS: [f64; LAYER_COUNT] = [0.18, 0.32, 0.62, 0.8];
const LAYER_GLYPHS: [&str; LAYER_COUNT] = ["·   ", "∘  ", "◦ ✦ ", "● "];
const TAB_BAR_ROWS: i32 = (TAB_BAR_HEIGHT / ROW_PX) as i32;

pub struct PageView<'a> {
    page: &'a SimPage,
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a SimPage) -> Self {
        Self { page }
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let painter = Painter {
            area,
            scroll_y: self.page.scroll_y(),
        };
        let layout = self.page.layout();

        // Backgrounds, row by row.
        for i in 0..area.height {
            let doc_y = painter.scroll_y + f64::from(i) * ROW_PX;
            let style = if contains(layout.banner, doc_y) {
                Theme::banner_style()
            } else if contains(layout.hero, doc_y) {
                Theme::hero_style()
            } else if contains(layout.footer, doc_y) {
                Theme::footer_style()
            } else {
                Style::default()
            };
            buf.set_style(Rect::new(area.x, area.y + i, area.width, 1), style);
        }

        painter.text(buf, layout.banner.top + 24.0, 2, "  Creator Fund · Start a project", Theme::banner_style());

        // Hero: parallax layers, headline, call to action.
        let hero = layout.hero;
        for (layer, offset) in self.page.layer_offsets().iter().enumerate() {
            let doc_y = hero.top + hero.height * LAYER_ANCHORS[layer] + offset;
            if contains(hero, doc_y) {
                let glyphs = LAYER_GLYPHS[layer].repeat(usize::from(area.width));
                painter.text(buf, doc_y, 0, &glyphs, Theme::layer_style(layer));
            }
        }
        let stage = self.page.stage();
        painter.centered(buf, hero.top + hero.height * 0.45, stage.headline(), Theme::headline_style(stage));
        painter.centered(buf, hero.bottom() - 96.0, "Discover more ↓", Theme::discover_style());

        painter.text(buf, layout.intro.top + 48.0, 4, "How it works", Theme::section_title_style());
        painter.text(
            buf,
            layout.intro.top + 80.0,
            4,
            "Pick a goal, tell your story, and let backers do the rest.",
            Theme::intro_style(),
        );

        for &(tab, section) in &layout.sections {
            painter.text(
                buf,
                section.top + 32.0,
                2,
                &format!("── {} ──", tab.label()),
                Theme::section_title_style(),
            );
        }
        for card in &layout.reveals {
            let (text, style) = if self.page.is_revealed(card.id) {
                (
                    format!("[ ▣ {} story #{} ]", card.section.label(), card.id + 1),
                    Theme::card_style(),
                )
            } else {
                ("[ · · · ]".to_string(), Theme::card_hidden_style())
            };
            painter.text(buf, card.bounds.top, 6, &text, style);
        }

        painter.text(buf, layout.footer.top + 32.0, 2, "© Creator Fund", Theme::footer_style());

        // The docked bar is painted last so it overlays the content.
        let tabs = self.page.tabs();
        if let Some(top) = tab_bar_top_row(self.page) {
            painter.tab_bar(buf, top, tabs.docked, tabs.current, tabs.indicator);
        }
    }
}

/// Screen row (relative to the pane top, possibly negative) of the tab
/// bar's first row, or `None` when the bar is not mounted.
pub fn tab_bar_top_row(page: &SimPage) -> Option<i32> {
    if page.tabs().docked {
        return Some(0);
    }
    let bar = page.bounds(Element::TabBar)?;
    Some(((bar.top - page.scroll_y()) / ROW_PX).floor() as i32)
}

/// Which tab label sits under the terminal cell, if any.
pub fn tab_at(area: Rect, page: &SimPage, column: u16, row: u16) -> Option<TabId> {
    if column < area.x || row < area.y {
        return None;
    }
    let top = tab_bar_top_row(page)?;
    let rel_row = i32::from(row - area.y);
    if rel_row < top || rel_row >= top + TAB_BAR_ROWS || rel_row >= i32::from(area.height) {
        return None;
    }
    let docked = page.tabs().docked;
    let rel_col = column - area.x;
    TabId::ALL.into_iter().find(|&tab| {
        let (start, width) = anchor_columns(tab_anchor_geometry(tab, docked));
        rel_col >= start && rel_col < start + width
    })
}

fn anchor_columns(anchor: IndicatorGeometry) -> (u16, u16) {
    let start = (anchor.offset_left / COL_PX).floor() as u16;
    let width = (anchor.width / COL_PX).ceil().max(1.0) as u16;
    (start, width)
}

fn contains(bounds: Bounds, doc_y: f64) -> bool {
    doc_y >= bounds.top && doc_y < bounds.bottom()
}

/// Maps page coordinates onto the widget area and clips.
struct Painter {
    area: Rect,
    scroll_y: f64,
}

impl Painter {
    fn row_of(&self, doc_y: f64) -> Option<u16> {
        let r = ((doc_y - self.scroll_y) / ROW_PX).floor();
        (r >= 0.0 && r < f64::from(self.area.height)).then(|| self.area.y + r as u16)
    }

    fn put(&self, buf: &mut Buffer, rel_row: u16, column: u16, text: &str, style: Style) {
        if rel_row >= self.area.height || column >= self.area.width {
            return;
        }
        let max = usize::from(self.area.width - column);
        buf.set_stringn(self.area.x + column, self.area.y + rel_row, text, max, style);
    }

    fn text(&self, buf: &mut Buffer, doc_y: f64, column: u16, text: &str, style: Style) {
        if let Some(y) = self.row_of(doc_y) {
            self.put(buf, y - self.area.y, column, text, style);
        }
    }

    fn centered(&self, buf: &mut Buffer, doc_y: f64, text: &str, style: Style) {
        let width = text.chars().count() as u16;
        let column = self.area.width.saturating_sub(width) / 2;
        self.text(buf, doc_y, column, text, style);
    }

    fn tab_bar(
        &self,
        buf: &mut Buffer,
        top: i32,
        docked: bool,
        current: Option<TabId>,
        indicator: Option<IndicatorGeometry>,
    ) {
        let visible = |r: i32| r >= 0 && r < i32::from(self.area.height);
        for r in top..top + TAB_BAR_ROWS {
            if visible(r) {
                let y = self.area.y + r as u16;
                let blank = " ".repeat(usize::from(self.area.width));
                buf.set_string(self.area.x, y, blank, Theme::tab_bar_style(docked));
            }
        }

        let label_row = top + 1;
        if visible(label_row) {
            for tab in TabId::ALL {
                let (start, _) = anchor_columns(tab_anchor_geometry(tab, docked));
                let style = if current == Some(tab) {
                    Theme::tab_active_style()
                } else {
                    Theme::tab_bar_style(docked)
                };
                self.put(buf, label_row as u16, start + 1, tab.label(), style);
            }
        }

        let underline_row = top + 2;
        if let (Some(anchor), true) = (indicator, visible(underline_row)) {
            let (start, width) = anchor_columns(anchor);
            self.put(
                buf,
                underline_row as u16,
                start,
                &"▔".repeat(usize::from(width)),
                Theme::indicator_style(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controller::ScrollController;

    fn render(page: &SimPage, width: u16, height: u16) -> (Rect, Buffer) {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        PageView::new(page).render(area, &mut buf);
        (area, buf)
    }

    fn row_text(buf: &Buffer, area: Rect, y: u16) -> String {
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn screen_text(buf: &Buffer, area: Rect) -> String {
        (area.y..area.y + area.height)
            .map(|y| row_text(buf, area, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn mounted(viewport_rows: u16) -> SimPage {
        let mut page = SimPage::new(f64::from(viewport_rows) * ROW_PX);
        let targets = page.reveal_targets();
        let _controller = ScrollController::mount(&mut page, targets);
        page
    }

    #[test]
    fn top_of_page_shows_banner_and_headline() {
        let page = mounted(50);
        let (area, buf) = render(&page, 100, 50);
        let text = screen_text(&buf, area);
        assert!(text.contains("Creator Fund"));
        assert!(text.contains("Bring your idea to life"));
        assert!(text.contains("Discover more"));
    }

    #[test]
    fn in_flow_tab_bar_is_clickable() {
        let mut page = mounted(50);
        let bar = page.layout().tab_bar;
        page.jump_to(bar.top - 10.0 * ROW_PX);
        let area = Rect::new(0, 0, 100, 50);
        let top = tab_bar_top_row(&page).unwrap();
        assert_eq!(top, 10);

        let (start, _) = anchor_columns(tab_anchor_geometry(TabId::Fees, false));
        assert_eq!(tab_at(area, &page, start + 1, 11), Some(TabId::Fees));
        assert_eq!(tab_at(area, &page, start + 1, 20), None);
    }

    #[test]
    fn anchors_do_not_overlap() {
        for docked in [false, true] {
            let cols: Vec<_> = TabId::ALL
                .into_iter()
                .map(|t| anchor_columns(tab_anchor_geometry(t, docked)))
                .collect();
            for pair in cols.windows(2) {
                assert!(pair[0].0 + pair[0].1 <= pair[1].0 + 1);
            }
        }
    }
}
