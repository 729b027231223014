// ui/zoom.rs - Zoomed View Window
//
// Shows the newest magnified frame, letterboxed into the window. Dragging
// the window moves it, Q closes it.

use iced::widget::{center, container, image, mouse_area, text};
use iced::{window, Element, Length};

use screenzoom::{CaptureFrame, ZoomView};

use super::theme;
use crate::Message;

/// Zoom window content: the toolkit-independent view plus the current image
#[derive(Debug, Default)]
pub struct ZoomWindow {
    pub view: ZoomView,
    handle: Option<image::Handle>,
}

impl ZoomWindow {
    /// Take a new frame. Returns the window size to apply, if any.
    pub fn present(&mut self, frame: CaptureFrame) -> Option<(u32, u32)> {
        let frame = frame.into_rgba();
        let resize = self.view.present(frame.width, frame.height);
        self.handle = Some(image::Handle::from_rgba(frame.width, frame.height, frame.data));
        resize
    }

    /// Drop the image and size to the next frame again
    pub fn reset(&mut self) {
        self.view.reset();
        self.handle = None;
    }

    pub fn view(&self, id: window::Id) -> Element<'_, Message> {
        let content: Element<'_, Message> = match (&self.handle, self.view.viewport()) {
            (Some(handle), Some(viewport)) => center(
                image(handle.clone())
                    .width(Length::Fixed(viewport.width))
                    .height(Length::Fixed(viewport.height)),
            )
            .into(),
            // Black background while waiting
            _ => center(text("")).into(),
        };

        mouse_area(
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(theme::zoom_backdrop),
        )
        .on_press(Message::DragWindow(id))
        .into()
    }
}
