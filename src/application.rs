use chrono::Local;

use cosmic::app::{Core, Task as CosmicTask};
use cosmic::widget::{button, icon, text};
use cosmic::{Application, Element, executor};

use crate::config::FinitoConfig;
use crate::core::draft::{self, PickedFile, TodoDraft};
use crate::core::list::TodoList;
use crate::core::todo::{self, FileRef, TodoRecord};
use crate::fl;
use crate::message::Message;
use crate::pages;
use crate::remote::{self, Backend};

/// Structured state of the create form, populated on every change event and
/// validated as a unit at submit time.
pub struct CreateForm {
    pub title: String,
    pub body: String,
    pub finish_date: String,
    pub files: Vec<PickedFile>,
    pub error: String,
    pub busy: bool,
}

impl CreateForm {
    fn new() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            finish_date: Local::now().format("%Y-%m-%d").to_string(),
            files: Vec::new(),
            error: String::new(),
            busy: false,
        }
    }
}

/// Edit form, pre-populated from the record being edited. Existing files
/// are never re-uploaded; `new_files` holds the additional selection.
pub struct EditForm {
    pub id: String,
    pub title: String,
    pub body: String,
    pub finish_date: String,
    pub checked: bool,
    pub existing_files: Vec<FileRef>,
    pub new_files: Vec<PickedFile>,
    pub error: String,
    pub busy: bool,
}

impl EditForm {
    fn from_record(todo: &TodoRecord) -> Self {
        Self {
            id: todo.id.clone().unwrap_or_default(),
            title: todo.title.clone(),
            body: todo.body.clone(),
            finish_date: todo.finish_date.clone(),
            checked: todo.checked,
            existing_files: todo.files.clone(),
            new_files: Vec::new(),
            error: String::new(),
            busy: false,
        }
    }
}

/// Delete confirmation form, holding a snapshot of the record so the
/// workflow is unaffected by later list changes.
pub struct DeleteForm {
    pub todo: TodoRecord,
    pub confirm_input: String,
    pub error: String,
    pub busy: bool,
}

impl DeleteForm {
    fn new(todo: TodoRecord) -> Self {
        Self {
            todo,
            confirm_input: String::new(),
            error: String::new(),
            busy: false,
        }
    }
}

/// Which workflow the dialog surface is currently hosting.
pub enum Dialog {
    Create(CreateForm),
    Details(String),
    Edit(EditForm),
    Delete(DeleteForm),
}

pub struct Finito {
    core: Core,
    config: FinitoConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    backend: Backend,

    /// The in-memory list. Fetched once at startup, spliced locally after
    /// each successful workflow, never re-fetched.
    todos: TodoList,
    loading: bool,
    load_error: Option<String>,

    dialog: Option<Dialog>,
}

pub struct Flags {
    pub config: FinitoConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
    pub backend: Backend,
}

impl Application for Finito {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = "dev.finito.app";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let app = Self {
            core,
            config: flags.config,
            cosmic_config: flags.cosmic_config,
            backend: flags.backend,
            todos: TodoList::default(),
            loading: true,
            load_error: None,
            dialog: None,
        };

        // One fetch at startup, ordered ascending by finish date.
        let backend = app.backend.clone();
        let fetch = CosmicTask::perform(
            async move { backend.documents.list_todos().await },
            |result| cosmic::Action::App(Message::TodosFetched(result)),
        );

        (app, fetch)
    }

    fn header_center(&self) -> Vec<Element<'_, Message>> {
        vec![text::title4(fl!("app-title")).into()]
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        vec![
            button::icon(icon::from_name("list-add-symbolic"))
                .on_press(Message::OpenCreate)
                .into(),
        ]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::TodosFetched(result) => {
                self.loading = false;
                match result {
                    Ok(todos) => {
                        log::info!("Loaded {} todos", todos.len());
                        self.todos.replace_all(todos);
                    }
                    Err(e) => {
                        log::error!("Failed to load todos: {}", e);
                        self.load_error = Some(e);
                    }
                }
            }

            // --- Dialog lifecycle ---
            Message::OpenCreate => {
                self.dialog = Some(Dialog::Create(CreateForm::new()));
            }

            Message::OpenDetails(id) => {
                self.dialog = Some(Dialog::Details(id));
            }

            Message::OpenEdit(id) => {
                if let Some(todo) = self.todos.get(&id) {
                    self.dialog = Some(Dialog::Edit(EditForm::from_record(todo)));
                }
            }

            Message::OpenDelete(id) => {
                if let Some(todo) = self.todos.get(&id) {
                    self.dialog = Some(Dialog::Delete(DeleteForm::new(todo.clone())));
                }
            }

            Message::CloseDialog => {
                self.dialog = None;
            }

            // --- Form fields ---
            Message::CreateTitleChanged(value) => {
                if let Some(Dialog::Create(form)) = &mut self.dialog {
                    form.title = value;
                }
            }

            Message::CreateBodyChanged(value) => {
                if let Some(Dialog::Create(form)) = &mut self.dialog {
                    form.body = value;
                }
            }

            Message::CreateDateChanged(value) => {
                if let Some(Dialog::Create(form)) = &mut self.dialog {
                    form.finish_date = value;
                }
            }

            Message::EditTitleChanged(value) => {
                if let Some(Dialog::Edit(form)) = &mut self.dialog {
                    form.title = value;
                }
            }

            Message::EditBodyChanged(value) => {
                if let Some(Dialog::Edit(form)) = &mut self.dialog {
                    form.body = value;
                }
            }

            Message::EditDateChanged(value) => {
                if let Some(Dialog::Edit(form)) = &mut self.dialog {
                    form.finish_date = value;
                }
            }

            Message::DeleteConfirmChanged(value) => {
                if let Some(Dialog::Delete(form)) = &mut self.dialog {
                    form.confirm_input = value;
                }
            }

            // --- File selection ---
            Message::PickFiles => {
                return CosmicTask::perform(pick_files(), |picked| {
                    cosmic::Action::App(Message::FilesPicked(picked))
                });
            }

            Message::FilesPicked(picked) => {
                if picked.is_empty() {
                    // Picker dismissed; the previous selection stands.
                    return CosmicTask::none();
                }
                match &mut self.dialog {
                    Some(Dialog::Create(form)) => match draft::check_selection(&picked) {
                        Ok(()) => form.files = picked,
                        Err(message) => {
                            // One oversized file voids the whole selection.
                            form.files.clear();
                            form.error = message;
                        }
                    },
                    Some(Dialog::Edit(form)) => match draft::check_selection(&picked) {
                        Ok(()) => form.new_files = picked,
                        Err(message) => {
                            form.new_files.clear();
                            form.error = message;
                        }
                    },
                    _ => {}
                }
            }

            Message::DismissError => match &mut self.dialog {
                Some(Dialog::Create(form)) => form.error.clear(),
                Some(Dialog::Edit(form)) => form.error.clear(),
                Some(Dialog::Delete(form)) => form.error.clear(),
                _ => self.load_error = None,
            },

            // --- Create workflow ---
            Message::CreateSubmit => {
                if let Some(Dialog::Create(form)) = &mut self.dialog {
                    if form.busy {
                        return CosmicTask::none();
                    }
                    let todo_draft = TodoDraft {
                        title: form.title.trim().to_string(),
                        body: form.body.trim().to_string(),
                        finish_date: form.finish_date.clone(),
                        files: form.files.clone(),
                    };
                    // Validation failures abort before any remote call.
                    if let Err(message) = todo_draft.validate() {
                        form.error = message;
                        return CosmicTask::none();
                    }
                    form.error.clear();
                    form.busy = true;

                    let backend = self.backend.clone();
                    return CosmicTask::perform(
                        remote::create_todo(backend, todo_draft),
                        |result| cosmic::Action::App(Message::CreateFinished(result)),
                    );
                }
            }

            Message::CreateFinished(result) => match result {
                Ok(outcome) => {
                    for error in &outcome.upload_errors {
                        log::warn!("File upload failed during create: {}", error);
                    }
                    self.todos.push(outcome.todo);
                    if matches!(self.dialog, Some(Dialog::Create(_))) {
                        self.dialog = None;
                    }
                }
                Err(e) => {
                    // The dialog stays open for a retry; files uploaded so
                    // far are persisted in storage but unreferenced.
                    if let Some(Dialog::Create(form)) = &mut self.dialog {
                        form.busy = false;
                        form.error = e;
                    } else {
                        log::error!("Create failed after dialog was dismissed: {}", e);
                    }
                }
            },

            // --- Edit workflow ---
            Message::EditSubmit => {
                if let Some(Dialog::Edit(form)) = &mut self.dialog {
                    if form.busy {
                        return CosmicTask::none();
                    }
                    let todo_draft = TodoDraft {
                        title: form.title.trim().to_string(),
                        body: form.body.trim().to_string(),
                        finish_date: form.finish_date.clone(),
                        files: form.new_files.clone(),
                    };
                    if let Err(message) = todo_draft.validate() {
                        form.error = message;
                        return CosmicTask::none();
                    }
                    form.error.clear();
                    form.busy = true;

                    let backend = self.backend.clone();
                    return CosmicTask::perform(
                        remote::update_todo(
                            backend,
                            form.id.clone(),
                            todo_draft,
                            form.existing_files.clone(),
                            form.checked,
                        ),
                        |result| cosmic::Action::App(Message::EditFinished(result)),
                    );
                }
            }

            Message::EditFinished(result) => match result {
                Ok(outcome) => {
                    for error in &outcome.upload_errors {
                        log::warn!("File upload failed during edit: {}", error);
                    }
                    self.todos.replace(outcome.todo);
                    if matches!(self.dialog, Some(Dialog::Edit(_))) {
                        self.dialog = None;
                    }
                }
                Err(e) => {
                    if let Some(Dialog::Edit(form)) = &mut self.dialog {
                        form.busy = false;
                        form.error = e;
                    } else {
                        log::error!("Edit failed after dialog was dismissed: {}", e);
                    }
                }
            },

            Message::RemoveFile(file) => {
                if let Some(Dialog::Edit(form)) = &mut self.dialog {
                    if form.busy {
                        return CosmicTask::none();
                    }
                    // Optimistic: the file leaves the form immediately.
                    form.existing_files = todo::files_without(&form.existing_files, &file.url);
                    form.busy = true;

                    let backend = self.backend.clone();
                    return CosmicTask::perform(
                        remote::remove_file(
                            backend,
                            form.id.clone(),
                            file,
                            form.existing_files.clone(),
                        ),
                        |result| cosmic::Action::App(Message::FileRemoved(result)),
                    );
                }
            }

            Message::FileRemoved(result) => {
                if let Some(Dialog::Edit(form)) = &mut self.dialog {
                    form.busy = false;
                }
                match result {
                    Ok(outcome) => {
                        // An already-absent object still persisted the new
                        // file list, but the main list entry is left alone
                        // until the next full reload.
                        if outcome.removed_from_storage {
                            self.todos.set_files(&outcome.id, outcome.files);
                        }
                    }
                    Err(e) => {
                        // Local form state keeps the file removed; nothing
                        // was persisted. A later save can re-diverge.
                        if let Some(Dialog::Edit(form)) = &mut self.dialog {
                            form.error = e;
                        } else {
                            log::error!("File removal failed after dialog was dismissed: {}", e);
                        }
                    }
                }
            }

            // --- Delete workflow ---
            Message::DeleteSubmit => {
                if let Some(Dialog::Delete(form)) = &mut self.dialog {
                    if form.busy {
                        return CosmicTask::none();
                    }
                    // Exact match against the title, case- and
                    // whitespace-sensitive after trimming the input.
                    if form.confirm_input.trim() != form.todo.title {
                        form.error = "Titles don't match".to_string();
                        return CosmicTask::none();
                    }
                    form.error.clear();
                    form.busy = true;

                    let backend = self.backend.clone();
                    return CosmicTask::perform(
                        remote::delete_todo(backend, form.todo.clone()),
                        |result| cosmic::Action::App(Message::DeleteFinished(result)),
                    );
                }
            }

            Message::DeleteFinished(result) => match result {
                Ok(outcome) => {
                    self.todos.remove(&outcome.id);
                    if matches!(self.dialog, Some(Dialog::Delete(_))) {
                        self.dialog = None;
                    }
                }
                Err(e) => {
                    // Attachments already deleted from storage stay deleted.
                    if let Some(Dialog::Delete(form)) = &mut self.dialog {
                        form.busy = false;
                        form.error = e;
                    } else {
                        log::error!("Delete failed after dialog was dismissed: {}", e);
                    }
                }
            },

            // --- Inline checkbox toggle ---
            Message::ToggleChecked(id) => {
                if let Some(todo) = self.todos.get(&id) {
                    let checked = !todo.checked;
                    let backend = self.backend.clone();
                    return CosmicTask::perform(
                        remote::set_checked(backend, id.clone(), checked),
                        move |result| {
                            cosmic::Action::App(Message::CheckSaved(id.clone(), checked, result))
                        },
                    );
                }
            }

            Message::CheckSaved(id, checked, result) => match result {
                Ok(()) => self.todos.set_checked(&id, checked),
                Err(e) => log::error!("Failed to update checked state for {}: {}", id, e),
            },

            Message::OpenFileUrl(url) => {
                if let Err(e) = std::process::Command::new(&self.config.browser_command)
                    .arg(&url)
                    .spawn()
                {
                    log::error!("Failed to open {}: {}", url, e);
                }
            }
        }

        CosmicTask::none()
    }

    fn dialog(&self) -> Option<Element<'_, Message>> {
        match self.dialog.as_ref()? {
            Dialog::Create(form) => Some(pages::create::create_dialog(form)),
            Dialog::Details(id) => {
                let todo = self.todos.get(id)?;
                Some(pages::details::details_dialog(todo))
            }
            Dialog::Edit(form) => Some(pages::edit::edit_dialog(form)),
            Dialog::Delete(form) => Some(pages::delete::delete_dialog(form)),
        }
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        // Dismissing the dialog never cancels a workflow already in
        // flight; its completion message still splices the list.
        if self.dialog.is_some() {
            self.dialog = None;
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::event::listen_with(|event, _status, _id| {
            match event {
                cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                    key: cosmic::iced::keyboard::Key::Character(ref c),
                    modifiers,
                    ..
                }) if c.as_str() == "n" && modifiers.control() => {
                    Some(Message::OpenCreate)
                }
                _ => None,
            }
        })
    }

    fn view(&self) -> Element<'_, Message> {
        pages::todos::todos_view(&self.todos, self.loading, self.load_error.as_deref())
    }
}

/// Open the native file picker and stat the chosen files. Files that fail
/// to stat are dropped with a log entry; size enforcement happens in the
/// update loop so the whole selection can be voided at once.
async fn pick_files() -> Vec<PickedFile> {
    let Some(handles) = rfd::AsyncFileDialog::new().pick_files().await else {
        return Vec::new();
    };

    let mut picked = Vec::new();
    for handle in handles {
        let path = handle.path().to_path_buf();
        let name = handle.file_name();
        let size = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                log::warn!("Failed to stat {}: {}", path.display(), e);
                continue;
            }
        };
        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        picked.push(PickedFile { name, path, size, content_type });
    }
    picked
}
