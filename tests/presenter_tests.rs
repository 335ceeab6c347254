//! Presenter tests - the screen model stays in step with the simulation

use blockfall::core::{GameConfig, GameState, SimpleRng};
use blockfall::term::{FieldModel, FieldView, Viewport};
use blockfall::types::GameCommand;

/// Every grid block and the falling piece are shown where the simulation has them
fn assert_mirrors(state: &GameState, model: &FieldModel) {
    let mut expected = 0;
    for (cell, occupant) in state.grid().occupants() {
        assert_eq!(model.block(occupant.block), Some((cell, occupant.kind)));
        expected += 1;
    }
    if let Some(piece) = state.falling() {
        for (block, cell) in piece.blocks.iter().zip(piece.cells()) {
            assert_eq!(model.block(*block), Some((cell, piece.kind())));
            expected += 1;
        }
    }
    assert_eq!(model.visible_blocks(), expected);
    assert_eq!(model.score, state.score());
    assert_eq!(model.level, state.level());
    assert_eq!(model.paused, state.paused());
    assert_eq!(model.game_over, state.is_game_over());
}

#[test]
fn test_model_tracks_a_long_game() {
    let mut model = FieldModel::new();
    let mut state = GameState::new(GameConfig::default(), 555).unwrap();
    state.start(&mut model);
    assert_mirrors(&state, &model);

    let mut rng = SimpleRng::new(8);
    let commands = [
        GameCommand::MoveLeft,
        GameCommand::MoveRight,
        GameCommand::Rotate,
        GameCommand::ForceDrop,
        GameCommand::MoveLeft,
        GameCommand::MoveRight,
    ];
    for _ in 0..2000 {
        if state.is_game_over() {
            state.apply(GameCommand::Restart, &mut model);
        } else if rng.next_range(3) == 0 {
            state.tick(&mut model);
        } else {
            let command = commands[rng.next_range(commands.len() as u32) as usize];
            state.apply(command, &mut model);
        }
        assert_mirrors(&state, &model);
    }
}

#[test]
fn test_pause_overlay_follows_presenter() {
    let mut model = FieldModel::new();
    let mut state = GameState::new(GameConfig::default(), 3).unwrap();
    state.start(&mut model);
    state.apply(GameCommand::TogglePause, &mut model);

    let fb = FieldView::new(10, 20).render(&model, Viewport::new(60, 24));
    assert!((0..24).any(|y| fb.row_text(y).contains("PAUSED")));
}
