//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use netbak_app::AppState;

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI.
///
/// Only scroll bookkeeping (`state.scroll`) is written back.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let show_quick_bar = !state.settings.quick_commands.is_empty();
    let areas = layout::create(area, show_quick_bar);

    frame.render_widget(widgets::DeviceHeader::new(&state.session), areas.header);

    let terminal = widgets::TerminalView::new(&state.session).spinner_frame(state.spinner_frame);
    frame.render_stateful_widget(terminal, areas.terminal, &mut state.scroll);

    if show_quick_bar {
        let bar = widgets::QuickCommandBar::new(&state.settings.quick_commands)
            .enabled(state.session.is_ready());
        frame.render_widget(bar, areas.quick_bar);
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);
}
