//! Native menu construction from the core menu model

use tauri::menu::{CheckMenuItemBuilder, Menu, MenuBuilder, MenuItemBuilder, SubmenuBuilder};
use tauri::{AppHandle, Manager, Wry};

use switchboard_core::{MenuCommand, MenuEntry, MenuModel, PredefinedItem};

use crate::state::ShellState;

pub fn build_native_menu(app: &AppHandle, model: &MenuModel) -> tauri::Result<Menu<Wry>> {
    let mut menu = MenuBuilder::new(app);

    for submenu in &model.submenus {
        let mut builder = SubmenuBuilder::new(app, &submenu.title);

        for entry in &submenu.entries {
            builder = match entry {
                MenuEntry::Separator => builder.separator(),
                MenuEntry::Predefined(item) => match item {
                    PredefinedItem::Quit => builder.quit(),
                    PredefinedItem::Undo => builder.undo(),
                    PredefinedItem::Redo => builder.redo(),
                    PredefinedItem::Cut => builder.cut(),
                    PredefinedItem::Copy => builder.copy(),
                    PredefinedItem::Paste => builder.paste(),
                    PredefinedItem::SelectAll => builder.select_all(),
                    PredefinedItem::Fullscreen => builder.fullscreen(),
                },
                MenuEntry::Command {
                    command,
                    label,
                    accelerator,
                    checked: Some(checked),
                } => {
                    let mut item = CheckMenuItemBuilder::with_id(command.id(), label).checked(*checked);
                    if let Some(accelerator) = accelerator {
                        item = item.accelerator(accelerator);
                    }
                    builder.item(&item.build(app)?)
                }
                MenuEntry::Command {
                    command,
                    label,
                    accelerator,
                    checked: None,
                } => {
                    let mut item = MenuItemBuilder::with_id(command.id(), label);
                    if let Some(accelerator) = accelerator {
                        item = item.accelerator(accelerator);
                    }
                    builder.item(&item.build(app)?)
                }
            };
        }

        menu = menu.item(&builder.build()?);
    }

    menu.build()
}

/// Route native menu clicks to the controller.
pub fn handle_menu_event(app: &AppHandle, event: tauri::menu::MenuEvent) {
    let id: &str = event.id().as_ref();
    let Some(command) = MenuCommand::parse(id) else {
        return;
    };
    let Some(state) = app.try_state::<ShellState>() else {
        return;
    };

    tracing::debug!(command = %id, "Menu command");
    state.with_controller(|controller| controller.handle_menu(command));
}
