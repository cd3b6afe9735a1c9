use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, icon, row, text, text_input};
use cosmic::{Element, widget};

use crate::application::EditForm;
use crate::components::error_banner::error_banner;
use crate::fl;
use crate::message::Message;

pub fn edit_dialog(form: &EditForm) -> Element<'_, Message> {
    let mut content = column().spacing(12);

    content = content.push(
        text_input::text_input(fl!("todo-title-placeholder"), &form.title)
            .on_input(Message::EditTitleChanged)
            .on_submit(|_| Message::EditSubmit)
            .width(Length::Fill),
    );

    content = content.push(
        text_input::text_input(fl!("description-placeholder"), &form.body)
            .on_input(Message::EditBodyChanged)
            .width(Length::Fill),
    );

    content = content.push(text::title4(fl!("finish-until")));
    content = content.push(
        text_input::text_input(fl!("date-placeholder"), &form.finish_date)
            .on_input(Message::EditDateChanged)
            .width(Length::Fill),
    );

    // Files already on the record: openable, removable one at a time.
    if !form.existing_files.is_empty() {
        content = content.push(text::title4(fl!("files")));
        for file in &form.existing_files {
            let file_row = row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(
                    button::link(file.name.clone())
                        .on_press(Message::OpenFileUrl(file.url.clone())),
                )
                .push(
                    button::icon(icon::from_name("window-close-symbolic"))
                        .on_press(Message::RemoveFile(file.clone())),
                );
            content = content.push(file_row);
        }
    }

    content = content.push(text::title4(fl!("add-files")));
    content = content.push(button::standard(fl!("choose-files")).on_press(Message::PickFiles));
    for file in &form.new_files {
        content = content.push(text::caption(file.name.clone()));
    }

    if let Some(banner) = error_banner(&form.error) {
        content = content.push(banner);
    }

    let submit: Element<'_, Message> = if form.busy {
        text::caption(fl!("saving")).into()
    } else {
        button::suggested(fl!("confirm"))
            .on_press(Message::EditSubmit)
            .into()
    };

    widget::dialog()
        .title(fl!("edit-title", title = form.title.clone()))
        .control(content)
        .primary_action(submit)
        .secondary_action(button::standard(fl!("cancel")).on_press(Message::CloseDialog))
        .into()
}
