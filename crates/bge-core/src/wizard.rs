//! Wizard Navigator: mounts exactly one screen at a time.
//!
//! Navigation is always forward: mounting a stage drops the outgoing screen
//! and whatever it held unless the request carries it over. There is no
//! history stack.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use bge_domain::{Batch, BatchId, Template};

use crate::batch_creator::BatchCreator;
use crate::batch_selector::BatchSelector;
use crate::entry_sheet::EntrySheet;
use crate::error::CoreError;
use crate::gateway::RemoteGateway;
use crate::notify::Notifier;
use crate::settings::WizardSettings;
use crate::template_editor::{EditorMode, TemplateEditor};
use crate::template_selector::TemplateSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStage {
    Initial,
    BatchSelection,
    BatchCreation,
    TemplateSelection,
    TemplateCreation,
    EnterData,
}

impl WizardStage {
    pub fn title(self) -> &'static str {
        match self {
            WizardStage::Initial => "Batch Entry",
            WizardStage::BatchSelection => "Continue a Batch",
            WizardStage::BatchCreation => "Create a Batch",
            WizardStage::TemplateSelection => "Select a Template",
            WizardStage::TemplateCreation => "Template Fields",
            WizardStage::EnterData => "Enter Data",
        }
    }

    /// Whether the progress bar shows by default on this stage.
    fn shows_progress(self) -> bool {
        !matches!(self, WizardStage::Initial | WizardStage::BatchSelection)
    }
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A stage together with the parameters its screen is constructed from.
#[derive(Debug, Clone, PartialEq)]
pub enum MountRequest {
    Initial,
    BatchSelection,
    BatchCreation,
    TemplateSelection { batch: Option<Batch> },
    TemplateCreation { template: Template, mode: EditorMode },
    EnterData { batch_id: Option<BatchId> },
}

impl MountRequest {
    pub fn stage(&self) -> WizardStage {
        match self {
            MountRequest::Initial => WizardStage::Initial,
            MountRequest::BatchSelection => WizardStage::BatchSelection,
            MountRequest::BatchCreation => WizardStage::BatchCreation,
            MountRequest::TemplateSelection { .. } => WizardStage::TemplateSelection,
            MountRequest::TemplateCreation { .. } => WizardStage::TemplateCreation,
            MountRequest::EnterData { .. } => WizardStage::EnterData,
        }
    }
}

/// Steps of the progress bar, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStage {
    CreateBatchStage,
    SelectBatchStage,
    EnterDataStage,
}

impl ProcessStage {
    pub const ALL: [ProcessStage; 3] = [
        ProcessStage::CreateBatchStage,
        ProcessStage::SelectBatchStage,
        ProcessStage::EnterDataStage,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            ProcessStage::CreateBatchStage => "createBatchStage",
            ProcessStage::SelectBatchStage => "selectBatchStage",
            ProcessStage::EnterDataStage => "enterDataStage",
        }
    }

    pub fn from_wire_name(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.wire_name().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessStage::CreateBatchStage => "Create batch",
            ProcessStage::SelectBatchStage => "Select template",
            ProcessStage::EnterDataStage => "Enter data",
        }
    }

    pub fn for_stage(stage: WizardStage) -> Option<Self> {
        match stage {
            WizardStage::BatchCreation => Some(ProcessStage::CreateBatchStage),
            WizardStage::TemplateSelection => Some(ProcessStage::SelectBatchStage),
            WizardStage::EnterData => Some(ProcessStage::EnterDataStage),
            WizardStage::Initial
            | WizardStage::BatchSelection
            | WizardStage::TemplateCreation => None,
        }
    }

    fn target(self) -> WizardStage {
        match self {
            ProcessStage::CreateBatchStage => WizardStage::BatchCreation,
            ProcessStage::SelectBatchStage => WizardStage::TemplateSelection,
            ProcessStage::EnterDataStage => WizardStage::EnterData,
        }
    }
}

/// Visibility flags accepted as an alternative stage description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerFlags {
    pub show_batch_selection: bool,
    pub show_batch_creation: bool,
    pub show_template_selection: bool,
    pub show_template_creation: bool,
    pub show_progress_bar: bool,
    pub process_stage: Option<ProcessStage>,
}

impl ContainerFlags {
    /// The stage these flags describe. The process stage wins over the
    /// individual flags; among flags the first set one is used.
    pub fn resolve(&self) -> Option<WizardStage> {
        if let Some(stage) = self.process_stage {
            return Some(stage.target());
        }
        [
            (self.show_batch_selection, WizardStage::BatchSelection),
            (self.show_batch_creation, WizardStage::BatchCreation),
            (self.show_template_selection, WizardStage::TemplateSelection),
            (self.show_template_creation, WizardStage::TemplateCreation),
        ]
        .into_iter()
        .find(|(shown, _)| *shown)
        .map(|(_, stage)| stage)
    }
}

/// Position of the current step within the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressIndicator {
    pub current: ProcessStage,
}

impl ProgressIndicator {
    /// Step labels paired with whether each is the current one.
    pub fn steps(&self) -> Vec<(&'static str, bool)> {
        ProcessStage::ALL
            .into_iter()
            .map(|stage| (stage.label(), stage == self.current))
            .collect()
    }

    /// 1-based position of the current step.
    pub fn position(&self) -> usize {
        ProcessStage::ALL
            .iter()
            .position(|stage| *stage == self.current)
            .map(|index| index + 1)
            .unwrap_or(1)
    }
}

/// Landing screen offering the three ways into the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitialScreen;

impl InitialScreen {
    pub fn next_to_continue_batch(&self) -> MountRequest {
        MountRequest::BatchSelection
    }

    pub fn next_to_create_batch(&self) -> MountRequest {
        MountRequest::BatchCreation
    }

    pub fn next_to_create_template(&self) -> MountRequest {
        MountRequest::TemplateCreation {
            template: Template::draft(),
            mode: EditorMode::Create,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Initial(InitialScreen),
    BatchSelection(BatchSelector),
    BatchCreation(BatchCreator),
    TemplateSelection(TemplateSelector),
    TemplateCreation(TemplateEditor),
    EnterData(EntrySheet),
}

impl Screen {
    pub fn stage(&self) -> WizardStage {
        match self {
            Screen::Initial(_) => WizardStage::Initial,
            Screen::BatchSelection(_) => WizardStage::BatchSelection,
            Screen::BatchCreation(_) => WizardStage::BatchCreation,
            Screen::TemplateSelection(_) => WizardStage::TemplateSelection,
            Screen::TemplateCreation(_) => WizardStage::TemplateCreation,
            Screen::EnterData(_) => WizardStage::EnterData,
        }
    }
}

/// Builds the screen for a mount request.
pub struct ScreenFactory<'a> {
    gateway: &'a dyn RemoteGateway,
    settings: &'a WizardSettings,
}

impl<'a> ScreenFactory<'a> {
    pub fn new(gateway: &'a dyn RemoteGateway, settings: &'a WizardSettings) -> Self {
        Self { gateway, settings }
    }

    pub fn build(&self, request: MountRequest) -> Screen {
        match request {
            MountRequest::Initial => Screen::Initial(InitialScreen),
            MountRequest::BatchSelection => Screen::BatchSelection(BatchSelector::open(self.gateway)),
            MountRequest::BatchCreation => Screen::BatchCreation(BatchCreator::new(
                self.settings.batch_required_fields.clone(),
            )),
            MountRequest::TemplateSelection { batch } => {
                Screen::TemplateSelection(TemplateSelector::open(batch, self.gateway))
            }
            MountRequest::TemplateCreation { template, mode } => Screen::TemplateCreation(
                TemplateEditor::open(template, mode, self.gateway, self.settings),
            ),
            MountRequest::EnterData { batch_id } => {
                Screen::EnterData(EntrySheet::open(batch_id, self.gateway, self.settings))
            }
        }
    }
}

/// Borrowed view handed to screen actions that need the gateway or toasts.
pub struct ScreenParts<'a> {
    pub screen: &'a mut Screen,
    pub gateway: &'a dyn RemoteGateway,
    pub notifier: &'a mut dyn Notifier,
}

pub struct WizardNavigator {
    gateway: Arc<dyn RemoteGateway>,
    notifier: Box<dyn Notifier>,
    settings: WizardSettings,
    screen: Screen,
    show_progress_bar: bool,
}

impl WizardNavigator {
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        notifier: Box<dyn Notifier>,
        settings: WizardSettings,
    ) -> Self {
        Self {
            gateway,
            notifier,
            settings,
            screen: Screen::Initial(InitialScreen),
            show_progress_bar: false,
        }
    }

    /// Replaces the mounted screen with one built from `request`.
    pub fn mount(&mut self, request: MountRequest) -> WizardStage {
        let stage = request.stage();
        self.show_progress_bar = stage.shows_progress();
        self.replace_screen(request);
        stage
    }

    /// Mounts the stage described by container flags, carrying `batch` into
    /// the stages that accept one.
    pub fn mount_with_flags(
        &mut self,
        flags: &ContainerFlags,
        batch: Option<Batch>,
    ) -> Result<WizardStage, CoreError> {
        let stage = flags.resolve().ok_or_else(|| {
            CoreError::InvalidOperation("container flags do not select a stage".into())
        })?;
        let request = match stage {
            WizardStage::Initial => MountRequest::Initial,
            WizardStage::BatchSelection => MountRequest::BatchSelection,
            WizardStage::BatchCreation => MountRequest::BatchCreation,
            WizardStage::TemplateSelection => MountRequest::TemplateSelection { batch },
            WizardStage::TemplateCreation => InitialScreen.next_to_create_template(),
            WizardStage::EnterData => MountRequest::EnterData {
                batch_id: batch.and_then(|batch| batch.id),
            },
        };
        self.show_progress_bar = flags.show_progress_bar;
        self.replace_screen(request);
        Ok(stage)
    }

    /// Mounts `request` when a screen action produced one.
    pub fn apply(&mut self, request: Option<MountRequest>) -> Option<WizardStage> {
        request.map(|request| self.mount(request))
    }

    pub fn stage(&self) -> WizardStage {
        self.screen.stage()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn parts(&mut self) -> ScreenParts<'_> {
        ScreenParts {
            screen: &mut self.screen,
            gateway: self.gateway.as_ref(),
            notifier: self.notifier.as_mut(),
        }
    }

    /// Replaces the settings; screens mounted afterwards pick them up.
    pub fn set_settings(&mut self, settings: WizardSettings) {
        self.settings = settings;
    }

    /// Progress bar state, when the mounted stage shows one.
    pub fn progress(&self) -> Option<ProgressIndicator> {
        if !self.show_progress_bar {
            return None;
        }
        ProcessStage::for_stage(self.stage()).map(|current| ProgressIndicator { current })
    }

    fn replace_screen(&mut self, request: MountRequest) {
        let outgoing = self.screen.stage();
        let stage = request.stage();
        let screen = ScreenFactory::new(self.gateway.as_ref(), &self.settings).build(request);
        self.screen = screen;
        info!(from = %outgoing, to = %stage, "mounted screen");
    }
}
