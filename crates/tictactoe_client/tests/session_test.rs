//! Tests for the single-player session controller.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe_client::{
    AccountService, GameResult, IllegalReason, JsonFileStore, Mark, MemoryStore, PlayerRecord,
    PlayerStore, Position, SessionController, SessionError, Square,
};

const SEED_SEARCH: u64 = 10_000;

fn controller(store: &MemoryStore, seed: u64) -> SessionController<MemoryStore> {
    SessionController::with_rng(store.clone(), StdRng::seed_from_u64(seed))
}

/// Plays the lowest empty square each turn until the game ends.
fn play_out(session: &mut SessionController<MemoryStore>) -> GameResult {
    while !session.engine().result().is_terminal() {
        let next = Position::valid_moves(session.engine().board())[0];
        session
            .play_turn(next.to_index())
            .expect("lowest empty square is always legal");
    }
    session.engine().result()
}

/// Finds a seed whose automated opponent produces `wanted` against
/// the lowest-empty-square strategy.
fn seed_for(wanted: GameResult) -> u64 {
    (0..SEED_SEARCH)
        .find(|&seed| {
            let mut session = controller(&MemoryStore::new(), seed);
            play_out(&mut session) == wanted
        })
        .expect("some seed yields the wanted result")
}

fn registered(username: &str) -> MemoryStore {
    let store = MemoryStore::new();
    AccountService::new(store.clone())
        .register(username, "secret")
        .expect("registration succeeds");
    store
}

fn record(store: &MemoryStore, username: &str) -> PlayerRecord {
    store
        .load()
        .unwrap()
        .into_iter()
        .find(|r| r.username() == username)
        .expect("record exists")
}

#[test]
fn test_top_row_wins_regardless_of_automated_replies() {
    let seed = (0..SEED_SEARCH)
        .find(|&seed| {
            let mut session = controller(&MemoryStore::new(), seed);
            session.play_turn(0).is_ok()
                && session.play_turn(1).is_ok()
                && session.engine().board().is_empty(Position::TopRight)
        })
        .expect("some seed leaves the top row open");

    let mut session = controller(&MemoryStore::new(), seed);
    session.play_turn(0).unwrap();
    session.play_turn(1).unwrap();
    let turn = session.play_turn(2).unwrap();

    assert_eq!(*turn.result(), GameResult::XWins);
    assert_eq!(*turn.automated_move(), None);
    assert_eq!(session.engine().result(), GameResult::XWins);
    assert_eq!(session.score().get(Mark::X), 1);
}

#[test]
fn test_loss_and_draw_recorded_for_alice() {
    let store = registered("alice");

    let mut session = controller(&store, seed_for(GameResult::OWins));
    session.start_session("alice".to_string());
    assert_eq!(play_out(&mut session), GameResult::OWins);

    let mut session = controller(&store, seed_for(GameResult::Draw));
    session.start_session("alice".to_string());
    assert_eq!(play_out(&mut session), GameResult::Draw);

    let alice = record(&store, "alice");
    assert_eq!(alice.username(), "alice");
    assert_eq!(*alice.wins(), 0);
    assert_eq!(*alice.total_games(), 2);
    assert_eq!(alice.defeats(), 2);
}

#[test]
fn test_win_recorded_and_scored() {
    let store = registered("bob");
    let mut session = controller(&store, seed_for(GameResult::XWins));
    session.start_session("bob".to_string());

    assert_eq!(play_out(&mut session), GameResult::XWins);
    assert_eq!(session.score().get(Mark::X), 1);
    assert_eq!(session.score().get(Mark::O), 0);

    let bob = record(&store, "bob");
    assert_eq!(*bob.wins(), 1);
    assert_eq!(*bob.total_games(), 1);
}

#[test]
fn test_draw_leaves_score_unchanged() {
    let store = registered("carol");
    let mut session = controller(&store, seed_for(GameResult::Draw));
    session.start_session("carol".to_string());

    assert_eq!(play_out(&mut session), GameResult::Draw);
    assert_eq!(session.score().get(Mark::X), 0);
    assert_eq!(session.score().get(Mark::O), 0);
}

#[test]
fn test_illegal_move_changes_nothing() {
    let mut session = controller(&MemoryStore::new(), 7);
    let turn = session.play_turn(4).unwrap();
    let taken = turn.automated_move().expect("O replies");
    let before = session.snapshot();

    let err = session.player_move(taken.to_index()).unwrap_err();
    assert_eq!(err.reason(), IllegalReason::Occupied);
    assert_eq!(session.snapshot(), before);

    let err = session.player_move(9).unwrap_err();
    assert_eq!(err.reason(), IllegalReason::OutOfRange);
    assert_eq!(session.snapshot(), before);

    // Retrying with a free square works.
    let free = Position::valid_moves(session.engine().board())[0];
    session.player_move(free.to_index()).unwrap();
    assert_eq!(session.engine().board().get(free), Square::Occupied(Mark::X));
}

#[test]
fn test_human_cannot_move_during_automated_turn() {
    let mut session = controller(&MemoryStore::new(), 3);
    session.player_move(0).unwrap();
    assert_eq!(session.engine().current_player(), Mark::O);

    let err = session.player_move(1).unwrap_err();
    assert_eq!(err.reason(), IllegalReason::NotYourTurn);
    assert!(session.engine().board().is_empty(Position::TopCenter));

    let reply = session.maybe_run_automated_turn().expect("O is due");
    assert_eq!(session.engine().board().get(reply), Square::Occupied(Mark::O));
    assert_eq!(session.engine().current_player(), Mark::X);
    assert_eq!(session.maybe_run_automated_turn(), None);
}

#[test]
fn test_moves_after_conclusion_rejected() {
    let mut session = controller(&MemoryStore::new(), seed_for(GameResult::XWins));
    play_out(&mut session);
    let before = session.snapshot();

    let free = Position::valid_moves(session.engine().board());
    let index = free.first().map_or(0, |p| p.to_index());
    let err = session.play_turn(index).unwrap_err();
    assert!(matches!(err, SessionError::Move(_)));
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.maybe_run_automated_turn(), None);
}

#[test]
fn test_on_game_concluded_records_once() {
    let store = registered("dave");
    let mut session = controller(&store, seed_for(GameResult::OWins));
    session.start_session("dave".to_string());
    play_out(&mut session);

    assert_eq!(session.on_game_concluded().unwrap(), None);
    assert_eq!(session.on_game_concluded().unwrap(), None);
    assert_eq!(session.score().get(Mark::O), 1);
    assert_eq!(*record(&store, "dave").total_games(), 1);
}

#[test]
fn test_on_game_concluded_ignores_running_game() {
    let mut session = controller(&MemoryStore::new(), 1);
    session.play_turn(4).unwrap();
    assert_eq!(session.on_game_concluded().unwrap(), None);
    assert_eq!(session.score().get(Mark::X), 0);
    assert_eq!(session.score().get(Mark::O), 0);
}

#[test]
fn test_new_game_keeps_score() {
    let store = registered("erin");
    let mut session = controller(&store, seed_for(GameResult::XWins));
    session.start_session("erin".to_string());
    play_out(&mut session);

    session.new_game();
    let snapshot = session.snapshot();
    assert_eq!(*snapshot.result(), GameResult::InProgress);
    assert_eq!(*snapshot.current_player(), Mark::X);
    assert_eq!(*snapshot.moves(), 0);
    assert!(Position::ALL.iter().all(|p| snapshot.board().is_empty(*p)));
    assert_eq!(snapshot.score().get(Mark::X), 1);
    assert_eq!(snapshot.username().as_deref(), Some("erin"));
}

#[test]
fn test_new_game_abandons_without_recording() {
    let store = registered("frank");
    let mut session = controller(&store, 11);
    session.start_session("frank".to_string());
    session.play_turn(0).unwrap();

    session.new_game();
    assert_eq!(*record(&store, "frank").total_games(), 0);
    assert!(session.engine().history().is_empty());
}

#[test]
fn test_start_session_resets_score_only_for_new_player() {
    let store = MemoryStore::new();
    let mut session = controller(&store, seed_for(GameResult::XWins));
    session.start_session("gina".to_string());
    play_out(&mut session);
    assert_eq!(session.score().get(Mark::X), 1);

    session.start_session("gina".to_string());
    assert_eq!(session.score().get(Mark::X), 1);

    session.start_session("hank".to_string());
    assert_eq!(session.score().get(Mark::X), 0);
    assert_eq!(session.active_username(), Some("hank"));
}

#[test]
fn test_end_session_clears_player_and_score() {
    let store = MemoryStore::new();
    let mut session = controller(&store, seed_for(GameResult::XWins));
    session.start_session("ivy".to_string());
    play_out(&mut session);

    session.end_session();
    assert_eq!(session.active_username(), None);
    assert_eq!(session.score().get(Mark::X), 0);
    assert_eq!(session.engine().result(), GameResult::InProgress);
}

#[test]
fn test_unregistered_player_result_not_persisted() {
    let store = MemoryStore::new();
    let mut session = controller(&store, seed_for(GameResult::XWins));
    session.start_session("ghost".to_string());

    assert_eq!(play_out(&mut session), GameResult::XWins);
    assert_eq!(session.score().get(Mark::X), 1);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_other_players_untouched_by_result() {
    let store = registered("jack");
    AccountService::new(store.clone())
        .register("kate", "secret")
        .unwrap();

    let mut session = controller(&store, seed_for(GameResult::XWins));
    session.start_session("jack".to_string());
    play_out(&mut session);

    assert_eq!(*record(&store, "jack").wins(), 1);
    assert_eq!(*record(&store, "kate").total_games(), 0);
    let names: Vec<String> = store
        .load()
        .unwrap()
        .iter()
        .map(|r| r.username().clone())
        .collect();
    assert_eq!(names, ["jack", "kate"]);
}

#[test]
fn test_snapshot_serializes_for_presentation() {
    let mut session = controller(&MemoryStore::new(), 5);
    session.start_session("lena".to_string());
    session.play_turn(4).unwrap();

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["username"], "lena");
    assert_eq!(json["moves"], 2);
    assert_eq!(json["result"], "InProgress");
}

#[test]
fn test_store_failure_still_scores_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut session = SessionController::with_rng(
        JsonFileStore::new(&path),
        StdRng::seed_from_u64(seed_for(GameResult::XWins)),
    );
    session.start_session("alice".to_string());

    let failure = loop {
        let next = Position::valid_moves(session.engine().board())[0];
        match session.play_turn(next.to_index()) {
            Ok(turn) => assert!(!turn.result().is_terminal()),
            Err(e) => break e,
        }
    };

    assert!(matches!(failure, SessionError::Store(_)));
    assert_eq!(session.engine().result(), GameResult::XWins);
    assert_eq!(session.score().get(Mark::X), 1);
    assert_eq!(session.on_game_concluded().unwrap(), None);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}
