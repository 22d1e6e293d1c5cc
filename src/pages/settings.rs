use cosmic::iced::{Alignment, Length};
use cosmic::widget::{column, row, text, text_input};

use crate::config::CertameConfig;
use crate::fl;
use crate::message::Message;

pub fn settings_view<'a>(config: &'a CertameConfig) -> column::Column<'a, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("api-url-label")));
    content = content.push(
        text_input::text_input("http://localhost:3000", &config.api_url)
            .on_input(Message::SetApiUrl)
            .on_submit(|_| Message::ApplyApiUrl)
            .width(Length::Fill),
    );
    content = content.push(text::caption(fl!("api-url-hint")));

    content = content.push(text::title4(fl!("browser-label")));
    content = content.push(
        text_input::text_input("xdg-open", &config.browser_command)
            .on_input(Message::SetBrowserCommand)
            .width(Length::Fill),
    );

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("debug-logging")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    content
}
