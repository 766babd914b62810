use crate::app::{App, Screen};
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => {
            if let Some(mut opening) = app.opening.take() {
                opening.cancel(&mut app.events);
            }
            app.should_quit = true;
        }
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::Activate => app.activate_primary(),
        InputAction::Back => app.back(),
        InputAction::ShowPacks => app.show_packs(),
        InputAction::ShowCollection => app.show_collection(),
        InputAction::Search => app.start_search(),
        InputAction::CycleRarity if app.screen == Screen::Collection => app.cycle_rarity_filter(),
        InputAction::CycleRole if app.screen == Screen::Collection => app.cycle_role_filter(),
        InputAction::CycleRarity | InputAction::CycleRole => {}
        InputAction::ResetProgress => app.request_reset(),
    }
}
