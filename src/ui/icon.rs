// ui/icon.rs - Procedural Application Icon
//
// A 16x16 magnifier glyph drawn in code, used for the tray and the windows.

pub const ICON_SIZE: u32 = 16;

/// RGBA pixels of the icon: a white ring with a blue lens and a handle
pub fn icon_rgba() -> Vec<u8> {
    let mut icon_data = vec![0u8; (ICON_SIZE * ICON_SIZE * 4) as usize];
    let (cx, cy) = (6.5f32, 6.5f32);

    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let offset = ((y * ICON_SIZE + x) * 4) as usize;
            let (fx, fy) = (x as f32, y as f32);
            let dist = ((fx - cx).powi(2) + (fy - cy).powi(2)).sqrt();

            let pixel = if (4.5..=6.0).contains(&dist) {
                // Lens rim - white
                [255, 255, 255, 255]
            } else if dist < 4.5 {
                // Lens - blue
                [0, 122, 204, 255]
            } else if x >= 10 && y >= 10 && x.abs_diff(y) <= 1 {
                // Handle - white
                [255, 255, 255, 255]
            } else {
                // Background - transparent
                [0, 0, 0, 0]
            };
            icon_data[offset..offset + 4].copy_from_slice(&pixel);
        }
    }

    icon_data
}

/// Load the application icon for windows
pub fn window_icon() -> Option<iced::window::Icon> {
    iced::window::icon::from_rgba(icon_rgba(), ICON_SIZE, ICON_SIZE).ok()
}
