use std::path::{Path, PathBuf};

use anyhow::Context;
use cosmic::iced::Length;
use cosmic::iced_widget::{column, container};
use cosmic::widget::text;
use cosmic::{ApplicationExt, Element, Task, app, iced_futures::event::listen_with};

use crate::capture::image::LoadedImage;
use crate::config::TaggerConfig;
use crate::domain::ViewState;
use crate::fl;
use crate::session::editor::Editor;
use crate::session::messages::{self, FileMsg};
use crate::session::{handlers, shortcuts};
use crate::widget::box_canvas::{BoxCanvas, CanvasStyle};
use crate::widget::toolbar::{ToolbarState, toolbar};

/// Extensions offered by the open dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "gif", "webp"];

pub(crate) fn run() -> cosmic::iced::Result {
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(1100.0, 800.0))
        .exit_on_close(false);
    cosmic::app::run::<App>(settings, ())
}

/// Last outcome shown in the status line
#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Info(String),
    Error(String),
}

pub struct App {
    core: app::Core,
    config: TaggerConfig,
    editor: Editor,
    /// Display handle for the editor's current image
    picture: Option<LoadedImage>,
    view: ViewState,
    notice: Option<Notice>,
    title: String,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Session(messages::Msg),
    Keyboard(cosmic::iced::keyboard::Event),
    CloseRequested(cosmic::iced::window::Id),
}

impl App {
    fn canvas_style(&self) -> CanvasStyle {
        CanvasStyle {
            box_color: self.config.box_color.into(),
            selected_color: self.config.selected_color.into(),
            handle_size: self.config.handle_size,
        }
    }

    fn status_line(&self) -> String {
        let summary = match self.editor.image() {
            Some(info) => fl!(
                "status-image",
                name = info.file_name(),
                width = info.size.width(),
                height = info.size.height(),
                boxes = self.editor.len(),
                selected = self.editor.selection_len()
            ),
            None => fl!("status-no-image"),
        };
        match &self.notice {
            Some(Notice::Info(msg)) => format!("{summary} · {msg}"),
            Some(Notice::Error(msg)) => format!("{summary} · {}", fl!("status-error", error = msg.as_str())),
            None => summary,
        }
    }

    fn update_title(&mut self) -> Task<cosmic::Action<Msg>> {
        let title = match self.editor.image() {
            Some(info) if self.editor.is_dirty() => {
                fl!("window-title-unsaved", name = info.file_name())
            }
            Some(info) => fl!("window-title", name = info.file_name()),
            None => fl!("app-title"),
        };
        if title == self.title {
            return Task::none();
        }
        self.title = title.clone();
        match self.core.main_window_id() {
            Some(id) => self.set_window_title(title, id),
            None => Task::none(),
        }
    }

    fn pick_image(&self) -> Task<cosmic::Action<Msg>> {
        let mut dialog = rfd::AsyncFileDialog::new()
            .set_title(fl!("open-image"))
            .add_filter(fl!("image-files"), IMAGE_EXTENSIONS);
        if let Some(dir) = self.config.last_directory.clone().or_else(dirs::picture_dir) {
            dialog = dialog.set_directory(dir);
        }
        cosmic::Task::perform(
            async move {
                dialog
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            |path| cosmic::Action::App(Msg::Session(messages::Msg::picked(path))),
        )
    }

    /// Load an image and its existing annotations.
    ///
    /// A failed decode leaves everything as it was. A broken sidecar leaves
    /// the new image open with no boxes.
    fn open_image(&mut self, path: &Path) -> anyhow::Result<usize> {
        let rgba = self
            .editor
            .load_image(path)
            .with_context(|| format!("could not open {}", path.display()))?;
        if let Some(info) = self.editor.image() {
            self.picture = Some(LoadedImage::new(info, rgba));
        }
        self.view.refit(self.editor.image_size());

        if let Some(dir) = path.parent() {
            self.config.last_directory = Some(dir.to_path_buf());
            self.config.save();
        }

        self.editor
            .restore_sidecar()
            .context("could not read existing annotations")
    }

    fn handle_file_msg(&mut self, msg: FileMsg) -> Task<cosmic::Action<Msg>> {
        match msg {
            FileMsg::Open => return self.pick_image(),
            FileMsg::Picked(None) => {}
            FileMsg::Picked(Some(path)) => self.switch_to(path),
            FileMsg::Save => self.save(),
        }
        Task::none()
    }

    fn switch_to(&mut self, path: PathBuf) {
        if !self.autosave() {
            return;
        }

        match self.open_image(&path) {
            Ok(imported) => {
                log::info!("Imported {imported} boxes for {}", path.display());
                self.notice = Some(Notice::Info(fl!("status-opened", boxes = imported)));
            }
            Err(err) => {
                log::warn!("{err:#}");
                self.notice = Some(Notice::Error(format!("{err:#}")));
            }
        }
    }

    /// Save a dirty session if autosave is on. `false` if that failed, in
    /// which case the boxes stay on screen and the error is shown.
    fn autosave(&mut self) -> bool {
        match handlers::autosave(&mut self.editor, self.config.autosave) {
            Ok(Some(path)) => {
                log::info!("Autosaved {}", path.display());
                true
            }
            Ok(None) => true,
            Err(err) => {
                log::error!("Autosave failed: {err}");
                self.notice = Some(Notice::Error(err.to_string()));
                false
            }
        }
    }

    fn close_requested(&mut self) -> Task<cosmic::Action<Msg>> {
        if self.autosave() {
            cosmic::iced::exit()
        } else {
            Task::none()
        }
    }

    fn save(&mut self) {
        match self.editor.save_sidecar() {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.notice = Some(Notice::Info(fl!("status-saved", name = name)));
            }
            Err(err) => {
                log::error!("Save failed: {err}");
                self.notice = Some(Notice::Error(err.to_string()));
            }
        }
    }

    fn update_session(&mut self, msg: messages::Msg) -> Task<cosmic::Action<Msg>> {
        let limits = self.config.zoom_limits();
        match msg {
            messages::Msg::Canvas(event) => {
                handlers::handle_canvas_event(
                    &mut self.editor,
                    &mut self.view,
                    event,
                    limits,
                    self.config.handle_size,
                );
                Task::none()
            }
            messages::Msg::Edit(edit) => {
                handlers::handle_edit_msg(&mut self.editor, edit);
                Task::none()
            }
            messages::Msg::View(view) => {
                handlers::handle_view_msg(&self.editor, &mut self.view, view, limits);
                Task::none()
            }
            messages::Msg::File(file) => self.handle_file_msg(file),
        }
    }
}

impl cosmic::Application for App {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Msg;

    const APP_ID: &'static str = TaggerConfig::ID;

    fn core(&self) -> &app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut app::Core {
        &mut self.core
    }

    fn init(
        core: app::Core,
        _flags: Self::Flags,
    ) -> (Self, cosmic::iced::Task<cosmic::Action<Self::Message>>) {
        let mut app = Self {
            core,
            config: TaggerConfig::load(),
            editor: Editor::new(),
            picture: None,
            view: ViewState::default(),
            notice: None,
            title: String::new(),
        };
        let task = app.update_title();
        (app, task)
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;

        let toolbar = toolbar(
            ToolbarState {
                has_image: self.editor.image().is_some(),
                has_selection: self.editor.selection_len() > 0,
                is_dirty: self.editor.is_dirty(),
            },
            spacing,
        )
        .map(Msg::Session);

        let canvas: Element<'_, messages::Msg> = BoxCanvas::new(
            &self.editor,
            self.picture.as_ref(),
            self.view.viewport,
            self.canvas_style(),
            messages::Msg::Canvas,
        )
        .into();

        let status = container(text::body(self.status_line())).padding([
            spacing.space_xxs,
            spacing.space_s,
        ]);

        column![
            toolbar,
            container(canvas.map(Msg::Session))
                .width(Length::Fill)
                .height(Length::Fill),
            status,
        ]
        .into()
    }

    fn update(&mut self, message: Self::Message) -> cosmic::iced::Task<cosmic::Action<Self::Message>> {
        let task = match message {
            Msg::Keyboard(cosmic::iced::keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                match shortcuts::handle_key_event(key, modifiers) {
                    Some(msg) => self.update_session(msg),
                    None => Task::none(),
                }
            }
            Msg::Keyboard(_) => Task::none(),
            Msg::Session(msg) => self.update_session(msg),
            Msg::CloseRequested(_) => self.close_requested(),
        };
        Task::batch([task, self.update_title()])
    }

    fn on_close_requested(&self, id: cosmic::iced::window::Id) -> Option<Self::Message> {
        Some(Msg::CloseRequested(id))
    }

    fn subscription(&self) -> cosmic::iced_futures::Subscription<Self::Message> {
        listen_with(|e, _, _| match e {
            cosmic::iced_core::Event::Keyboard(keyboard_event) => {
                Some(Msg::Keyboard(keyboard_event))
            }
            _ => None,
        })
    }
}
