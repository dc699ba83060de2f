//! Toolbar widget for file and view actions

use cosmic::Element;
use cosmic::cosmic_theme::Spacing;
use cosmic::iced::Length;
use cosmic::iced_core::alignment;
use cosmic::iced_widget::row;
use cosmic::widget::divider::vertical;
use cosmic::widget::{button, icon, tooltip};

use crate::fl;
use crate::session::messages::Msg;

/// What the toolbar needs to know to enable its buttons
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolbarState {
    pub has_image: bool,
    pub has_selection: bool,
    pub is_dirty: bool,
}

fn tool_button<'a>(
    icon_name: &'static str,
    tip: String,
    on_press: Option<Msg>,
    spacing: &Spacing,
) -> Element<'a, Msg> {
    tooltip(
        button::custom(
            icon::Icon::from(icon::from_name(icon_name).size(64))
                .width(Length::Fixed(24.0))
                .height(Length::Fixed(24.0)),
        )
        .class(cosmic::theme::Button::Icon)
        .on_press_maybe(on_press)
        .padding(spacing.space_xs),
        cosmic::widget::text(tip),
        tooltip::Position::Bottom,
    )
    .into()
}

/// Build the toolbar row
pub fn toolbar<'a>(state: ToolbarState, spacing: Spacing) -> Element<'a, Msg> {
    let when_image = |msg: Msg| state.has_image.then_some(msg);

    let save_tip = if state.is_dirty {
        fl!("save-unsaved")
    } else {
        fl!("save")
    };

    let file_group = row![
        tool_button("document-open-symbolic", fl!("open-image"), Some(Msg::open()), &spacing),
        tool_button("document-save-symbolic", save_tip, when_image(Msg::save()), &spacing),
    ]
    .spacing(spacing.space_xxs);

    let edit_group = row![tool_button(
        "edit-delete-symbolic",
        fl!("delete-selection"),
        state.has_selection.then_some(Msg::delete_selected()),
        &spacing,
    )]
    .spacing(spacing.space_xxs);

    let view_group = row![
        tool_button("zoom-fit-best-symbolic", fl!("fit-to-window"), when_image(Msg::fit()), &spacing),
        tool_button("zoom-in-symbolic", fl!("zoom-in"), when_image(Msg::zoom_in()), &spacing),
        tool_button("zoom-out-symbolic", fl!("zoom-out"), when_image(Msg::zoom_out()), &spacing),
    ]
    .spacing(spacing.space_xxs);

    row![
        file_group,
        vertical::light().height(Length::Fixed(24.0)),
        edit_group,
        vertical::light().height(Length::Fixed(24.0)),
        view_group,
    ]
    .spacing(spacing.space_s)
    .padding(spacing.space_xs)
    .align_y(alignment::Alignment::Center)
    .into()
}
