use std::sync::{Arc, Mutex};
use std::time::Duration;

use compositions_core::{GameSettings, Level, QuestionGenerator};
use services::{
    AnswerOutcome, CountdownError, FixedSettings, GameController, LevelSettings, SessionError,
    SessionPhase,
};

fn controller(settings: GameSettings) -> GameController {
    GameController::new(
        Arc::new(FixedSettings::new(settings)),
        QuestionGenerator::seeded(11),
    )
}

fn scenario() -> GameController {
    controller(GameSettings::new(10, 3, 60, 5).unwrap())
}

fn record_times(game: &GameController) -> Arc<Mutex<Vec<String>>> {
    let times = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&times);
    game.signals()
        .formatted_time
        .subscribe(move |time: &String| sink.lock().unwrap().push(time.clone()));
    times
}

fn answer(game: &GameController, pattern: &[bool]) {
    for correct in pattern {
        let question = game.current_question().expect("question while running");
        let value = if *correct {
            question.right_answer()
        } else {
            question
                .options()
                .iter()
                .copied()
                .find(|option| *option != question.right_answer())
                .unwrap()
        };
        let outcome = game.submit_answer(value).unwrap();
        assert!(matches!(outcome, AnswerOutcome::Recorded { .. }));
    }
}

#[tokio::test(start_paused = true)]
async fn three_second_game_ticks_three_times_then_finishes() {
    let mut game = controller(GameSettings::new(10, 1, 50, 3).unwrap());
    let times = record_times(&game);

    game.start(Level::Test).unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(*times.lock().unwrap(), vec!["00:03", "00:02", "00:01"]);
    assert_eq!(game.phase(), SessionPhase::Finished);
    assert!(game.result().is_some());
    assert!(!game.is_counting_down());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(times.lock().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn three_of_four_right_wins() {
    let mut game = scenario();
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&results);
    game.signals()
        .game_result
        .subscribe(move |result| sink.lock().unwrap().push(result.clone()));

    game.start(Level::Test).unwrap();
    answer(&game, &[true, true, false, true]);

    let progress = game.progress().unwrap();
    assert!(progress.enough_count);
    assert!(progress.enough_percent);
    assert_eq!(progress.percent, 75);

    tokio::time::sleep(Duration::from_secs(6)).await;

    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].winner);
    assert_eq!(results[0].count_of_right_answers, 3);
    assert_eq!(results[0].count_of_questions, 4);
}

#[tokio::test(start_paused = true)]
async fn one_of_four_right_loses() {
    let mut game = scenario();
    game.start(Level::Test).unwrap();
    answer(&game, &[false, false, true, false]);

    tokio::time::sleep(Duration::from_secs(6)).await;

    let result = game.result().unwrap();
    assert!(!result.winner);
    assert_eq!(result.count_of_right_answers, 1);
    assert_eq!(result.count_of_questions, 4);
}

#[tokio::test(start_paused = true)]
async fn idle_player_loses_with_zero_answers() {
    let mut game = scenario();
    game.start(Level::Test).unwrap();

    tokio::time::sleep(Duration::from_secs(6)).await;

    let result = game.result().unwrap();
    assert!(!result.winner);
    assert_eq!(result.count_of_right_answers, 0);
    assert_eq!(result.count_of_questions, 0);
    assert_eq!(game.signals().percent_of_right_answers.get(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn answers_after_finish_are_ignored() {
    let mut game = scenario();
    game.start(Level::Test).unwrap();
    answer(&game, &[true]);
    tokio::time::sleep(Duration::from_secs(6)).await;

    let question = game.signals().question.get();
    let late = game.current_question().unwrap().right_answer();
    assert_eq!(game.submit_answer(late).unwrap(), AnswerOutcome::Ignored);

    assert_eq!(game.progress().unwrap().total_questions, 1);
    assert_eq!(game.signals().question.get(), question);
    assert_eq!(game.result().unwrap().count_of_questions, 1);
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_ticks_and_skips_result() {
    let mut game = scenario();
    let times = record_times(&game);
    let signals = game.signals();

    game.start(Level::Test).unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    game.teardown();
    game.teardown();

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(*times.lock().unwrap(), vec!["00:05", "00:04"]);
    assert_eq!(game.phase(), SessionPhase::Finished);
    assert_eq!(signals.game_result.get(), None);
    assert!(!game.is_counting_down());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_controller_releases_the_countdown() {
    let mut game = scenario();
    let times = record_times(&game);
    let signals = game.signals();

    game.start(Level::Test).unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    drop(game);

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(*times.lock().unwrap(), vec!["00:05"]);
    assert_eq!(signals.game_result.get(), None);
}

#[tokio::test(start_paused = true)]
async fn built_in_level_drives_time_and_thresholds() {
    let mut game = GameController::new(Arc::new(LevelSettings), QuestionGenerator::seeded(5));
    let times = record_times(&game);

    game.start(Level::Test).unwrap();
    tokio::task::yield_now().await;

    assert_eq!(times.lock().unwrap().first().map(String::as_str), Some("00:08"));
    assert_eq!(game.signals().min_percent.get(), Some(50));
    assert_eq!(
        game.signals().progress_answers.get().as_deref(),
        Some("0 of 3")
    );
}

#[tokio::test(start_paused = true)]
async fn second_start_is_rejected() {
    let mut game = scenario();
    game.start(Level::Test).unwrap();
    assert_eq!(game.start(Level::Test).unwrap_err(), SessionError::AlreadyStarted);
}

#[test]
fn start_outside_runtime_fails_cleanly() {
    let mut game = scenario();
    let err = game.start(Level::Test).unwrap_err();
    assert_eq!(err, SessionError::Countdown(CountdownError::NoRuntime));
    assert_eq!(game.phase(), SessionPhase::Finished);
}
