// ui/button.rs - Floating Menu Button
//
// A small round window: the inner button toggles the control panel, the
// ring around it drags the window.

use iced::widget::{button, center, container, mouse_area, text};
use iced::{window, Center, Element, Length};

use super::theme;
use crate::Message;

const INNER_SIZE: f32 = 44.0;

pub fn view(id: window::Id) -> Element<'static, Message> {
    let menu = button(text("☰").size(18).align_x(Center).align_y(Center).width(Length::Fill).height(Length::Fill))
        .width(Length::Fixed(INNER_SIZE))
        .height(Length::Fixed(INNER_SIZE))
        .style(theme::floating_button)
        .on_press(Message::TogglePanel);

    mouse_area(
        container(center(menu))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::button_ring),
    )
    .on_press(Message::DragWindow(id))
    .into()
}
