use chrono::NaiveDate;

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, checkbox, column, container, icon, row, text};
use cosmic::{Element, theme};

use crate::core::todo::TodoRecord;
use crate::fl;
use crate::message::Message;

// Column widths for consistent alignment
const COL_CHECK: f32 = 28.0;
const COL_DATE: f32 = 150.0;
const COL_DELETE: f32 = 40.0;

fn col(width: f32, content: impl Into<Element<'static, Message>>) -> Element<'static, Message> {
    container(content).width(Length::Fixed(width)).into()
}

pub fn todo_grid<'a>(
    todos: impl Iterator<Item = &'a TodoRecord>,
    today: NaiveDate,
) -> Element<'static, Message> {
    let mut content = column().spacing(4).width(Length::Fill);

    for todo in todos {
        content = content.push(todo_row(todo, today));
    }

    content.into()
}

fn todo_row(todo: &TodoRecord, today: NaiveDate) -> Element<'static, Message> {
    let id = todo.id.clone().unwrap_or_default();
    // Checked-off and long-overdue rows share the dimmed style.
    let inactive = todo.checked || todo.is_expired(today);

    let check_id = id.clone();
    let check: Element<'static, Message> = col(
        COL_CHECK,
        checkbox("", todo.checked).on_toggle(move |_| Message::ToggleChecked(check_id.clone())),
    );

    let title_text: Element<'static, Message> = if inactive {
        text::caption(todo.title.clone()).into()
    } else {
        text::body(todo.title.clone()).into()
    };
    let details_id = id.clone();
    let title: Element<'static, Message> = container(
        button::custom(title_text)
            .padding([0, 0])
            .class(theme::Button::Text)
            .on_press(Message::OpenDetails(details_id)),
    )
    .width(Length::Fill)
    .into();

    let date = col(
        COL_DATE,
        text::caption(fl!("finish-until-date", date = todo.finish_date_display())),
    );

    let delete: Element<'static, Message> = col(
        COL_DELETE,
        button::icon(icon::from_name("user-trash-symbolic"))
            .on_press(Message::OpenDelete(id)),
    );

    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(check)
        .push(title)
        .push(date)
        .push(delete)
        .into()
}
