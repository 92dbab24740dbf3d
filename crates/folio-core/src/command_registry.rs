use std::fmt;
use std::sync::Arc;

use crate::content::PortfolioContent;
use crate::outputs;
use crate::payload::OutputPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Help,
    Gui,
    About,
    Skills,
    Projects,
    Experience,
    Resume,
    Contact,
    Clear,
    Exit,
    Back,
    Matrix,
    HireMe,
}

impl CommandId {
    pub fn as_str(self) -> &'static str {
        CommandRegistry::spec(self).name
    }

    pub fn from_name(normalized: &str) -> Option<Self> {
        COMMAND_SPECS
            .iter()
            .find(|spec| spec.name == normalized)
            .map(|spec| spec.id)
    }

    pub fn control(self) -> Option<ControlSignal> {
        CommandRegistry::spec(self).control
    }

    pub fn is_control(self) -> bool {
        self.control().is_some()
    }
}

/// Side effect a control command asks the controller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    ClearScreen,
    NavigateLanding,
    MatrixOverlay,
    SwitchToAlternateUi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub summary: &'static str,
    pub listed: bool,
    pub control: Option<ControlSignal>,
}

const COMMAND_SPECS: [CommandSpec; 13] = [
    CommandSpec {
        id: CommandId::Help,
        name: "help",
        summary: "Show available commands",
        listed: false,
        control: None,
    },
    CommandSpec {
        id: CommandId::Gui,
        name: "gui",
        summary: "Switch to GUI Interface",
        listed: true,
        control: Some(ControlSignal::SwitchToAlternateUi),
    },
    CommandSpec {
        id: CommandId::About,
        name: "about",
        summary: "Learn about me",
        listed: true,
        control: None,
    },
    CommandSpec {
        id: CommandId::Skills,
        name: "skills",
        summary: "View technical skills",
        listed: true,
        control: None,
    },
    CommandSpec {
        id: CommandId::Projects,
        name: "projects",
        summary: "Browse my projects",
        listed: true,
        control: None,
    },
    CommandSpec {
        id: CommandId::Experience,
        name: "experience",
        summary: "Work history",
        listed: true,
        control: None,
    },
    CommandSpec {
        id: CommandId::Resume,
        name: "resume",
        summary: "Download my CV",
        listed: true,
        control: None,
    },
    CommandSpec {
        id: CommandId::Contact,
        name: "contact",
        summary: "Get in touch",
        listed: true,
        control: None,
    },
    CommandSpec {
        id: CommandId::Clear,
        name: "clear",
        summary: "Clear terminal",
        listed: true,
        control: Some(ControlSignal::ClearScreen),
    },
    CommandSpec {
        id: CommandId::Exit,
        name: "exit",
        summary: "Exit the Terminal",
        listed: true,
        control: Some(ControlSignal::NavigateLanding),
    },
    CommandSpec {
        id: CommandId::Back,
        name: "back",
        summary: "Exit the Terminal",
        listed: false,
        control: Some(ControlSignal::NavigateLanding),
    },
    CommandSpec {
        id: CommandId::Matrix,
        name: "matrix",
        summary: "Enter the matrix",
        listed: true,
        control: Some(ControlSignal::MatrixOverlay),
    },
    CommandSpec {
        id: CommandId::HireMe,
        name: "sudo hire_me",
        summary: "Secret command",
        listed: true,
        control: None,
    },
];

pub type Producer = Arc<dyn Fn(&PortfolioContent) -> OutputPayload + Send + Sync>;

#[derive(Clone)]
pub struct CustomCommand {
    pub name: String,
    pub summary: String,
    producer: Producer,
}

impl fmt::Debug for CustomCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCommand")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// What a submitted line resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Builtin(CommandId),
    Custom(String),
    Unknown,
}

impl Dispatch {
    pub fn control(&self) -> Option<ControlSignal> {
        match self {
            Self::Builtin(id) => id.control(),
            Self::Custom(_) | Self::Unknown => None,
        }
    }

    /// Whether the raw input belongs in the recall history.
    pub fn is_recordable(&self) -> bool {
        self.control().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub normalized: String,
    pub dispatch: Dispatch,
    pub payload: OutputPayload,
}

/// Command table for one console session.
///
/// Built-ins come from a fixed table; extra commands are registered while
/// the registry is being constructed and the population never changes
/// afterwards.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    content: Arc<PortfolioContent>,
    custom: Vec<CustomCommand>,
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl CommandRegistry {
    pub fn new(content: Arc<PortfolioContent>) -> Self {
        Self {
            content,
            custom: Vec::new(),
        }
    }

    /// Registers an extra command. Names shadowing a built-in or an earlier
    /// registration are ignored.
    pub fn with_command(
        mut self,
        name: &str,
        summary: &str,
        producer: impl Fn(&PortfolioContent) -> OutputPayload + Send + Sync + 'static,
    ) -> Self {
        let name = normalize(name);
        if name.is_empty() || CommandId::from_name(&name).is_some() || self.custom_command(&name).is_some()
        {
            tracing::warn!(command = %name, "ignoring duplicate or empty command registration");
            return self;
        }
        self.custom.push(CustomCommand {
            name,
            summary: summary.to_string(),
            producer: Arc::new(producer),
        });
        self
    }

    pub fn list() -> &'static [CommandSpec] {
        &COMMAND_SPECS
    }

    pub fn spec(id: CommandId) -> &'static CommandSpec {
        match id {
            CommandId::Help => &COMMAND_SPECS[0],
            CommandId::Gui => &COMMAND_SPECS[1],
            CommandId::About => &COMMAND_SPECS[2],
            CommandId::Skills => &COMMAND_SPECS[3],
            CommandId::Projects => &COMMAND_SPECS[4],
            CommandId::Experience => &COMMAND_SPECS[5],
            CommandId::Resume => &COMMAND_SPECS[6],
            CommandId::Contact => &COMMAND_SPECS[7],
            CommandId::Clear => &COMMAND_SPECS[8],
            CommandId::Exit => &COMMAND_SPECS[9],
            CommandId::Back => &COMMAND_SPECS[10],
            CommandId::Matrix => &COMMAND_SPECS[11],
            CommandId::HireMe => &COMMAND_SPECS[12],
        }
    }

    pub fn content(&self) -> &PortfolioContent {
        &self.content
    }

    pub fn custom_commands(&self) -> &[CustomCommand] {
        &self.custom
    }

    /// `(name, summary)` rows shown by `help`, built-ins first.
    pub fn help_rows(&self) -> Vec<(&str, &str)> {
        COMMAND_SPECS
            .iter()
            .filter(|spec| spec.listed)
            .map(|spec| (spec.name, spec.summary))
            .chain(
                self.custom
                    .iter()
                    .map(|command| (command.name.as_str(), command.summary.as_str())),
            )
            .collect()
    }

    pub fn lookup(&self, raw: &str) -> Dispatch {
        let normalized = normalize(raw);
        if let Some(id) = CommandId::from_name(&normalized) {
            Dispatch::Builtin(id)
        } else if self.custom_command(&normalized).is_some() {
            Dispatch::Custom(normalized)
        } else {
            Dispatch::Unknown
        }
    }

    pub fn resolve(&self, raw: &str) -> Resolution {
        let normalized = normalize(raw);
        let dispatch = self.lookup(&normalized);
        let payload = match &dispatch {
            Dispatch::Builtin(id) => self.produce(*id),
            Dispatch::Custom(name) => match self.custom_command(name) {
                Some(command) => (command.producer)(&self.content),
                None => outputs::not_found(&normalized),
            },
            Dispatch::Unknown => outputs::not_found(&normalized),
        };
        Resolution {
            normalized,
            dispatch,
            payload,
        }
    }

    fn produce(&self, id: CommandId) -> OutputPayload {
        let content = self.content.as_ref();
        match id {
            CommandId::Help => outputs::help(&self.help_rows()),
            CommandId::Gui => outputs::gui(),
            CommandId::About => outputs::about(content),
            CommandId::Skills => outputs::skills(content),
            CommandId::Projects => outputs::projects(content),
            CommandId::Experience => outputs::experience(content),
            CommandId::Resume => outputs::resume(content),
            CommandId::Contact => outputs::contact(content),
            CommandId::Clear => outputs::clear(),
            CommandId::Exit | CommandId::Back => outputs::exit(),
            CommandId::Matrix => outputs::matrix(content),
            CommandId::HireMe => outputs::hire_me(content),
        }
    }

    fn custom_command(&self, normalized: &str) -> Option<&CustomCommand> {
        self.custom.iter().find(|command| command.name == normalized)
    }
}
