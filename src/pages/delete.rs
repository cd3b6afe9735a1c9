use cosmic::iced::Length;
use cosmic::widget::{button, column, text, text_input};
use cosmic::{Element, widget};

use crate::application::DeleteForm;
use crate::components::error_banner::error_banner;
use crate::fl;
use crate::message::Message;

pub fn delete_dialog(form: &DeleteForm) -> Element<'_, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::body(fl!("delete-prompt", title = form.todo.title.clone())));
    content = content.push(
        text_input::text_input("", &form.confirm_input)
            .on_input(Message::DeleteConfirmChanged)
            .on_submit(|_| Message::DeleteSubmit)
            .width(Length::Fill),
    );

    if let Some(banner) = error_banner(&form.error) {
        content = content.push(banner);
    }

    let submit: Element<'_, Message> = if form.busy {
        text::caption(fl!("saving")).into()
    } else {
        button::destructive(fl!("delete"))
            .on_press(Message::DeleteSubmit)
            .into()
    };

    widget::dialog()
        .title(fl!("delete-title", title = form.todo.title.clone()))
        .control(content)
        .primary_action(submit)
        .secondary_action(button::standard(fl!("cancel")).on_press(Message::CloseDialog))
        .into()
}
