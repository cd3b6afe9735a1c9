use chrono::Local;

use cosmic::iced::Length;
use cosmic::Element;
use cosmic::widget::{column, container, scrollable, text};

use crate::components::error_banner::error_banner;
use crate::components::todo_row::todo_grid;
use crate::core::list::TodoList;
use crate::fl;
use crate::message::Message;

/// The single page of the application: the full todo list, ordered as the
/// store returned it.
pub fn todos_view(
    todos: &TodoList,
    loading: bool,
    load_error: Option<&str>,
) -> Element<'static, Message> {
    let mut content = column().spacing(8);

    if let Some(message) = load_error {
        if let Some(banner) = error_banner(message) {
            content = content.push(banner);
        }
    }

    if loading {
        content = content.push(
            container(text::body(fl!("loading")))
                .padding(32)
                .center_x(Length::Fill),
        );
    } else if todos.is_empty() {
        content = content.push(
            container(text::title3(fl!("no-todos")))
                .padding(32)
                .center_x(Length::Fill),
        );
    } else {
        let today = Local::now().date_naive();
        content = content.push(todo_grid(todos.records().iter(), today));
    }

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
