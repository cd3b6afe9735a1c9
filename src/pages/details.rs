use cosmic::widget::{button, column, text};
use cosmic::{Element, widget};

use crate::core::todo::TodoRecord;
use crate::fl;
use crate::message::Message;

/// Read-only view of one todo, with its attachments and the edit trigger.
pub fn details_dialog(todo: &TodoRecord) -> Element<'_, Message> {
    let mut content = column().spacing(8);

    if !todo.body.is_empty() {
        content = content.push(text::body(todo.body.clone()));
    }

    content = content.push(text::caption(fl!(
        "finish-until-date",
        date = todo.finish_date_display()
    )));

    if !todo.files.is_empty() {
        content = content.push(text::title4(fl!("files")));
        for file in &todo.files {
            content = content.push(
                button::link(file.name.clone()).on_press(Message::OpenFileUrl(file.url.clone())),
            );
        }
    }

    let id = todo.id.clone().unwrap_or_default();

    widget::dialog()
        .title(todo.title.clone())
        .control(content)
        .primary_action(button::suggested(fl!("edit")).on_press(Message::OpenEdit(id)))
        .secondary_action(button::standard(fl!("cancel")).on_press(Message::CloseDialog))
        .into()
}
