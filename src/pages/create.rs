use cosmic::iced::Length;
use cosmic::widget::{button, column, text, text_input};
use cosmic::{Element, widget};

use crate::application::CreateForm;
use crate::components::error_banner::error_banner;
use crate::fl;
use crate::message::Message;

pub fn create_dialog(form: &CreateForm) -> Element<'_, Message> {
    let mut content = column().spacing(12);

    content = content.push(
        text_input::text_input(fl!("todo-title-placeholder"), &form.title)
            .on_input(Message::CreateTitleChanged)
            .on_submit(|_| Message::CreateSubmit)
            .width(Length::Fill),
    );

    content = content.push(
        text_input::text_input(fl!("description-placeholder"), &form.body)
            .on_input(Message::CreateBodyChanged)
            .width(Length::Fill),
    );

    content = content.push(text::title4(fl!("finish-until")));
    content = content.push(
        text_input::text_input(fl!("date-placeholder"), &form.finish_date)
            .on_input(Message::CreateDateChanged)
            .width(Length::Fill),
    );

    content = content.push(text::title4(fl!("files")));
    content = content.push(button::standard(fl!("choose-files")).on_press(Message::PickFiles));
    for file in &form.files {
        content = content.push(text::caption(file.name.clone()));
    }

    if let Some(banner) = error_banner(&form.error) {
        content = content.push(banner);
    }

    // While the workflow runs, the submit control is replaced so the form
    // cannot be submitted twice.
    let submit: Element<'_, Message> = if form.busy {
        text::caption(fl!("saving")).into()
    } else {
        button::suggested(fl!("submit"))
            .on_press(Message::CreateSubmit)
            .into()
    };

    widget::dialog()
        .title(fl!("create-title"))
        .control(content)
        .primary_action(submit)
        .secondary_action(button::standard(fl!("cancel")).on_press(Message::CloseDialog))
        .into()
}
