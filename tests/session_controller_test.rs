//! Tests for the session state machine and the session manager.

use arcade_engine::connect_four::ConnectFour;
use arcade_engine::tictactoe::TicTacToe;
use arcade_engine::{
    AnyMove, EngineConfig, EngineError, Opponent, Outcome, Phase, Session, SessionManager,
    SessionObserver, Side, Snapshot, Strategy, VariantKind, legal_moves,
};
use std::cell::RefCell;
use std::rc::Rc;

fn hot_seat() -> Session<TicTacToe> {
    Session::new(TicTacToe, Side::A, Opponent::Human, 0)
}

#[derive(Default)]
struct Recorder {
    phases: Rc<RefCell<Vec<Phase>>>,
    outcomes: Rc<RefCell<Vec<Outcome>>>,
}

impl SessionObserver<TicTacToe> for Recorder {
    fn on_snapshot(&mut self, snapshot: &Snapshot<TicTacToe>) {
        self.phases.borrow_mut().push(snapshot.phase);
    }

    fn on_terminal(&mut self, outcome: Outcome) {
        self.outcomes.borrow_mut().push(outcome);
    }
}

#[test]
fn test_computer_replies_within_submission() {
    let mut session =
        Session::new(TicTacToe, Side::A, Opponent::Computer(Strategy::EXHAUSTIVE), 0);
    let report = session.submit_human_move(0).expect("legal");

    assert!(report.outcome.is_none());
    assert!(report.opponent.is_some());
    assert_eq!(report.snapshot.move_count, 2);
    assert_eq!(report.snapshot.to_move, Side::A);
    assert_eq!(report.snapshot.phase, Phase::AwaitingHumanMove);
}

#[test]
fn test_illegal_move_keeps_phase_and_board() {
    let mut session = hot_seat();
    session.submit_human_move(4).expect("legal");
    let before = session.snapshot();

    assert_eq!(session.submit_human_move(4), Err(EngineError::IllegalMove("4".to_string())));
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.phase(), Phase::AwaitingHumanMove);
}

#[test]
fn test_hot_seat_alternates_sides() {
    let mut session = hot_seat();
    let report = session.submit_human_move(0).expect("legal");
    assert!(report.opponent.is_none());
    assert_eq!(report.snapshot.to_move, Side::B);
    assert_eq!(report.snapshot.touched, vec![0]);
    assert_eq!(report.snapshot.last_move, Some(0));
}

#[test]
fn test_win_reaches_terminal_and_blocks_moves() {
    let mut session = hot_seat();
    for cell in [0, 3, 1, 4] {
        session.submit_human_move(cell).expect("legal");
    }
    let report = session.submit_human_move(2).expect("winning move");

    assert_eq!(report.outcome, Some(Outcome::Win(Side::A)));
    assert_eq!(report.snapshot.winning_line, vec![0, 1, 2]);
    assert_eq!(session.phase(), Phase::Terminal);
    assert_eq!(
        session.submit_human_move(8),
        Err(EngineError::InvalidState {
            action: "submit a move",
            phase: Phase::Terminal,
        })
    );
    assert_eq!(session.scoreboard().wins(Side::A), 1);
}

#[test]
fn test_reset_keeps_scoreboard() {
    let mut session = hot_seat();
    for cell in [0, 3, 1, 4, 2] {
        session.submit_human_move(cell).expect("legal");
    }
    let snapshot = session.reset();

    assert_eq!(snapshot.phase, Phase::AwaitingHumanMove);
    assert_eq!(snapshot.to_move, Side::A);
    assert_eq!(snapshot.move_count, 0);
    assert!(snapshot.winning_line.is_empty());
    assert_eq!(snapshot.scoreboard.wins(Side::A), 1);

    // Reset mid-game is allowed too.
    session.submit_human_move(4).expect("legal");
    assert_eq!(session.reset().move_count, 0);
}

#[test]
fn test_observers_see_every_transition() {
    let recorder = Recorder::default();
    let phases = Rc::clone(&recorder.phases);
    let outcomes = Rc::clone(&recorder.outcomes);

    let mut session =
        Session::new(TicTacToe, Side::A, Opponent::Computer(Strategy::EXHAUSTIVE), 0);
    session.observe(recorder);
    session.submit_human_move(4).expect("legal");
    assert_eq!(
        *phases.borrow(),
        vec![Phase::ComputingOpponentMove, Phase::AwaitingHumanMove]
    );

    while session.phase() == Phase::AwaitingHumanMove {
        let first = legal_moves(session.rules(), session.state())[0];
        session.submit_human_move(first).expect("legal");
    }
    assert_eq!(phases.borrow().last(), Some(&Phase::Terminal));
    assert_eq!(outcomes.borrow().len(), 1);
    assert_eq!(outcomes.borrow()[0], session.state().outcome());
}

#[test]
fn test_closure_observer() {
    let counts = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&counts);
    let mut session = Session::new(ConnectFour, Side::A, Opponent::Human, 0);
    session.observe(move |_: &Snapshot<ConnectFour>| *seen.borrow_mut() += 1);

    session.submit_human_move(3).expect("legal");
    session.submit_human_move(3).expect("legal");
    session.reset();
    assert_eq!(*counts.borrow(), 3);
}

#[test]
fn test_manager_routes_by_id() {
    let mut manager = SessionManager::new(EngineConfig::default().with_seed(11));
    let ttt = manager.create_session(VariantKind::TicTacToe, Side::A);
    let c4 = manager.create_session(VariantKind::ConnectFour, Side::B);
    assert_ne!(ttt, c4);
    assert_eq!(manager.list_sessions().len(), 2);

    let report = manager
        .submit_human_move(&ttt, AnyMove::TicTacToe(4))
        .expect("legal");
    assert!(matches!(report.opponent.map(|r| r.mv), Some(AnyMove::TicTacToe(_))));
    assert_eq!(manager.snapshot(&c4).expect("exists").move_count(), 0);

    assert_eq!(
        manager.submit_human_move(&c4, AnyMove::TicTacToe(4)),
        Err(EngineError::MoveMismatch {
            mv: "4".to_string(),
            variant: VariantKind::ConnectFour,
        })
    );
    assert_eq!(
        manager.snapshot("missing"),
        Err(EngineError::UnknownSession("missing".to_string()))
    );

    let snapshot = manager.reset(&ttt).expect("exists");
    assert_eq!(snapshot.move_count(), 0);
    assert!(manager.close(&c4));
    assert_eq!(manager.list_sessions(), vec![ttt]);
}

#[test]
fn test_manager_full_column_is_illegal() {
    let config = EngineConfig::default().with_hot_seat(true);
    let mut manager = SessionManager::new(config);
    let id = manager.create_session(VariantKind::ConnectFour, Side::A);
    for _ in 0..6 {
        manager
            .submit_human_move(&id, AnyMove::ConnectFour(0))
            .expect("column has room");
    }
    assert_eq!(
        manager.submit_human_move(&id, AnyMove::ConnectFour(0)),
        Err(EngineError::IllegalMove("0".to_string()))
    );
}

#[test]
fn test_snapshot_serializes() {
    let mut manager = SessionManager::default();
    let id = manager.create_session(VariantKind::Chess, Side::A);
    manager
        .submit_human_move(&id, AnyMove::parse(VariantKind::Chess, "e2e4").expect("parses"))
        .expect("legal opening");

    let json = serde_json::to_value(manager.snapshot(&id).expect("exists")).expect("serializes");
    assert_eq!(json["variant"], "chess");
    assert_eq!(json["move_count"], 2);
    assert_eq!(json["scoreboard"]["a_wins"], 0);
}
