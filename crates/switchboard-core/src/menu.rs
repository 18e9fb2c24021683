//! Menu/Command Surface
//!
//! The application menu is a pure function of the account list. The Tauri
//! layer turns a [`MenuModel`] into native menus and hands clicked ids back
//! through [`MenuCommand::parse`].

const RETURN_TO_SELECTION_ID: &str = "return-to-selection";
const SWITCH_ACCOUNT_PREFIX: &str = "switch-account:";

/// Commands the lifecycle controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    ReturnToSelection,
    SwitchAccount(String),
}

impl MenuCommand {
    pub fn id(&self) -> String {
        match self {
            MenuCommand::ReturnToSelection => RETURN_TO_SELECTION_ID.to_string(),
            MenuCommand::SwitchAccount(name) => format!("{SWITCH_ACCOUNT_PREFIX}{name}"),
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        if id == RETURN_TO_SELECTION_ID {
            return Some(MenuCommand::ReturnToSelection);
        }
        id.strip_prefix(SWITCH_ACCOUNT_PREFIX)
            .filter(|name| !name.is_empty())
            .map(|name| MenuCommand::SwitchAccount(name.to_string()))
    }
}

/// Items the toolkit implements natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedItem {
    Quit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Fullscreen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Command {
        command: MenuCommand,
        label: String,
        accelerator: Option<String>,
        /// Rendered as a check item when `Some`
        checked: Option<bool>,
    },
    Predefined(PredefinedItem),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submenu {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    pub submenus: Vec<Submenu>,
}

impl MenuModel {
    /// All controller commands in menu order.
    pub fn commands(&self) -> Vec<&MenuCommand> {
        self.submenus
            .iter()
            .flat_map(|submenu| submenu.entries.iter())
            .filter_map(|entry| match entry {
                MenuEntry::Command { command, .. } => Some(command),
                _ => None,
            })
            .collect()
    }

    /// Account names offered as switch targets, in menu order.
    pub fn switch_targets(&self) -> Vec<&str> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                MenuCommand::SwitchAccount(name) => Some(name.as_str()),
                MenuCommand::ReturnToSelection => None,
            })
            .collect()
    }
}

/// Build the full application menu.
///
/// The first nine accounts get `CmdOrCtrl+<n>` accelerators; `active` is
/// shown checked.
pub fn build_menu(app_title: &str, accounts: &[String], active: Option<&str>) -> MenuModel {
    let app_menu = Submenu {
        title: app_title.to_string(),
        entries: vec![MenuEntry::Predefined(PredefinedItem::Quit)],
    };

    let edit_menu = Submenu {
        title: "Edit".to_string(),
        entries: vec![
            MenuEntry::Predefined(PredefinedItem::Undo),
            MenuEntry::Predefined(PredefinedItem::Redo),
            MenuEntry::Separator,
            MenuEntry::Predefined(PredefinedItem::Cut),
            MenuEntry::Predefined(PredefinedItem::Copy),
            MenuEntry::Predefined(PredefinedItem::Paste),
            MenuEntry::Predefined(PredefinedItem::SelectAll),
        ],
    };

    let mut account_entries = vec![
        MenuEntry::Command {
            command: MenuCommand::ReturnToSelection,
            label: "Choose Account…".to_string(),
            accelerator: Some("CmdOrCtrl+Shift+A".to_string()),
            checked: None,
        },
        MenuEntry::Separator,
    ];
    account_entries.extend(accounts.iter().enumerate().map(|(index, name)| {
        MenuEntry::Command {
            command: MenuCommand::SwitchAccount(name.clone()),
            label: name.clone(),
            accelerator: (index < 9).then(|| format!("CmdOrCtrl+{}", index + 1)),
            checked: Some(active == Some(name.as_str())),
        }
    }));

    let accounts_menu = Submenu {
        title: "Accounts".to_string(),
        entries: account_entries,
    };

    let view_menu = Submenu {
        title: "View".to_string(),
        entries: vec![MenuEntry::Predefined(PredefinedItem::Fullscreen)],
    };

    MenuModel {
        submenus: vec![app_menu, edit_menu, accounts_menu, view_menu],
    }
}
