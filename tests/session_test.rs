use std::collections::HashSet;
use std::io;
use std::time::Duration;
use timed_quiz::{
    report, run_session, AnswerReader, Grade, QuestionOrder, QuestionSet, QuizError,
    SessionOutcome, SessionSettings, TimerPolicy,
};
use tokio_test::io::Builder;

fn arithmetic() -> QuestionSet {
    QuestionSet::load("arithmetic", vec![("2+2", "4"), ("3+3", "6")]).unwrap()
}

fn global(limit: Duration) -> SessionSettings {
    SessionSettings::new(QuestionOrder::Sequential, limit, TimerPolicy::Global)
}

fn per_question(limit: Duration) -> SessionSettings {
    SessionSettings::new(QuestionOrder::Sequential, limit, TimerPolicy::PerQuestion)
}

/// 从输出中按出现顺序提取题干
fn presented_prompts(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out)
        .split("\tQuestion ")
        .skip(1)
        .filter_map(|chunk| {
            let (_, rest) = chunk.split_once(":\t\t")?;
            let (text, _) = rest.split_once(" = ")?;
            Some(text.to_string())
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_all_answered_in_time_completes() {
    let mut reader = AnswerReader::spawn(Builder::new().read(b"4\n6\n").build());
    let mut out = Vec::new();

    let outcome = run_session(arithmetic(), global(Duration::from_secs(10)), &mut reader, &mut out)
        .await
        .unwrap();

    assert!(matches!(outcome, SessionOutcome::Completed(_)));
    let set = outcome.question_set();
    assert_eq!(set.correct_count(), 2);
    assert_eq!(report(set), "100.00% (2/2) of the answers were correct.");
}

#[tokio::test(start_paused = true)]
async fn test_global_timeout_keeps_partial_credit() {
    let input = Builder::new()
        .read(b"4\n")
        .wait(Duration::from_secs(3600))
        .build();
    let mut reader = AnswerReader::spawn(input);
    let mut out = Vec::new();

    let outcome = run_session(arithmetic(), global(Duration::from_millis(10)), &mut reader, &mut out)
        .await
        .unwrap();

    assert!(outcome.is_timed_out());
    let set = outcome.question_set();
    assert_eq!(set.correct_count(), 1);
    assert_eq!(set.answered_count(), 1);
    assert_eq!(set.questions()[1].grade(), Grade::Ungraded);
    assert_eq!(report(set), "50.00% (1/2) of the answers were correct.");
}

#[tokio::test(start_paused = true)]
async fn test_global_timeout_counts_exactly_answers_before_deadline() {
    let set = QuestionSet::load(
        "five",
        vec![("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")],
    )
    .unwrap();
    // 每秒一条答案，第 3 条答错；4 秒限时内只交了 3 条，第 4 条 4.5 秒才到
    let input = Builder::new()
        .wait(Duration::from_secs(1))
        .read(b"1\n")
        .wait(Duration::from_secs(1))
        .read(b"2\n")
        .wait(Duration::from_secs(1))
        .read(b"x\n")
        .wait(Duration::from_millis(1500))
        .read(b"4\n")
        .wait(Duration::from_secs(3600))
        .build();
    let mut reader = AnswerReader::spawn(input);
    let mut out = Vec::new();

    let outcome = run_session(set, global(Duration::from_secs(4)), &mut reader, &mut out)
        .await
        .unwrap();

    assert!(outcome.is_timed_out());
    let set = outcome.question_set();
    assert_eq!(set.answered_count(), 3);
    assert_eq!(set.correct_count(), 2);
    assert!(set.correct_count() <= set.total_count());

    // 截止之后才到的答案没有被判分
    assert_eq!(reader.read_line().await.unwrap(), "4");
}

#[tokio::test(start_paused = true)]
async fn test_answer_completed_at_deadline_times_out() {
    // 第 2 条答案恰好在 2 秒截止时刻才输完，不算在限时内
    let input = Builder::new()
        .read(b"4\n")
        .wait(Duration::from_secs(2))
        .read(b"6\n")
        .build();
    let mut reader = AnswerReader::spawn(input);
    let mut out = Vec::new();

    let outcome = run_session(arithmetic(), global(Duration::from_secs(2)), &mut reader, &mut out)
        .await
        .unwrap();

    assert!(outcome.is_timed_out());
    let set = outcome.question_set();
    assert_eq!(set.correct_count(), 1);
    assert_eq!(set.questions()[1].grade(), Grade::Ungraded);
    assert_eq!(set.questions()[1].user_answer(), None);
}

#[tokio::test(start_paused = true)]
async fn test_huge_time_limit_does_not_panic() {
    let mut reader = AnswerReader::spawn(Builder::new().read(b"4\n6\n").build());
    let mut out = Vec::new();

    let outcome = run_session(
        arithmetic(),
        global(Duration::from_secs(u64::MAX)),
        &mut reader,
        &mut out,
    )
    .await
    .unwrap();

    assert!(!outcome.is_timed_out());
    assert_eq!(outcome.question_set().correct_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_user_answer_keeps_typed_case() {
    let set = QuestionSet::load("capitals", vec![("capital of France", "paris")]).unwrap();
    let mut reader = AnswerReader::spawn(Builder::new().read(b"  PARIS \n").build());
    let mut out = Vec::new();

    let outcome = run_session(set, global(Duration::from_secs(10)), &mut reader, &mut out)
        .await
        .unwrap();

    let question = &outcome.question_set().questions()[0];
    assert_eq!(question.user_answer(), Some("PARIS"));
    assert_eq!(question.grade(), Grade::Correct);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_preserves_order() {
    let set = QuestionSet::load("abc", vec![("first", "1"), ("second", "2"), ("third", "3")]).unwrap();
    let mut reader = AnswerReader::spawn(Builder::new().read(b"1\n2\n3\n").build());
    let mut out = Vec::new();

    let outcome = run_session(set, global(Duration::from_secs(10)), &mut reader, &mut out)
        .await
        .unwrap();

    assert_eq!(presented_prompts(&out), vec!["first", "second", "third"]);
    let texts: Vec<&str> = outcome
        .question_set()
        .questions()
        .iter()
        .map(|q| q.text.as_str())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(outcome.question_set().correct_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_randomized_presents_each_question_once() {
    let records: Vec<(String, String)> = (0..6).map(|i| (format!("q{i}"), "x".to_string())).collect();
    let expected: HashSet<String> = records.iter().map(|(text, _)| text.clone()).collect();

    for seed in [1u64, 2, 3, 99] {
        let set = QuestionSet::load("random", records.clone()).unwrap();
        let mut reader = AnswerReader::spawn(Builder::new().read(b"x\nx\nx\nx\nx\nx\n").build());
        let mut out = Vec::new();
        let settings = SessionSettings::new(
            QuestionOrder::Randomized,
            Duration::from_secs(10),
            TimerPolicy::Global,
        )
        .with_seed(Some(seed));

        let outcome = run_session(set, settings, &mut reader, &mut out).await.unwrap();

        let presented = presented_prompts(&out);
        assert_eq!(presented.len(), 6);
        assert_eq!(presented.iter().cloned().collect::<HashSet<_>>(), expected);
        assert_eq!(outcome.question_set().correct_count(), 6);
    }
}

#[tokio::test(start_paused = true)]
async fn test_per_question_late_answer_is_incorrect() {
    // 第 1 题 1 秒超时，1.5 秒时到达的 "6" 属于第 2 题
    let input = Builder::new()
        .wait(Duration::from_millis(1500))
        .read(b"6\n")
        .build();
    let mut reader = AnswerReader::spawn(input);
    let mut out = Vec::new();

    let outcome = run_session(arithmetic(), per_question(Duration::from_secs(1)), &mut reader, &mut out)
        .await
        .unwrap();

    assert!(matches!(outcome, SessionOutcome::Completed(_)));
    let set = outcome.question_set();
    assert_eq!(set.questions()[0].grade(), Grade::Incorrect);
    assert_eq!(set.questions()[0].user_answer(), None);
    assert_eq!(set.questions()[1].grade(), Grade::Correct);
    assert_eq!(set.correct_count(), 1);
    assert!(String::from_utf8_lossy(&out).contains("Time's up!"));
}

#[tokio::test(start_paused = true)]
async fn test_per_question_stale_input_does_not_leak() {
    // "4" 在第 1 题期间开始输入，换行在第 1 题超时之后才到，不能算作第 2 题的答案
    let input = Builder::new()
        .wait(Duration::from_millis(500))
        .read(b"4")
        .wait(Duration::from_secs(1))
        .read(b"\n6\n")
        .build();
    let mut reader = AnswerReader::spawn(input);
    let mut out = Vec::new();

    let set = QuestionSet::load("leak", vec![("2+2", "4"), ("what was that", "4")]).unwrap();
    let outcome = run_session(set, per_question(Duration::from_secs(1)), &mut reader, &mut out)
        .await
        .unwrap();

    let set = outcome.question_set();
    assert_eq!(set.questions()[0].grade(), Grade::Incorrect);
    assert_eq!(set.questions()[1].user_answer(), Some("6"));
    assert_eq!(set.questions()[1].grade(), Grade::Incorrect);
    assert_eq!(set.correct_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_per_question_all_timeouts_complete() {
    let input = Builder::new().wait(Duration::from_secs(3600)).build();
    let mut reader = AnswerReader::spawn(input);
    let mut out = Vec::new();

    let outcome = run_session(arithmetic(), per_question(Duration::from_secs(2)), &mut reader, &mut out)
        .await
        .unwrap();

    assert!(!outcome.is_timed_out());
    let set = outcome.question_set();
    assert_eq!(set.answered_count(), 2);
    assert_eq!(set.correct_count(), 0);
    assert_eq!(report(set), "0.00% (0/2) of the answers were correct.");
}

#[tokio::test(start_paused = true)]
async fn test_input_failure_aborts_session() {
    let input = Builder::new()
        .read(b"4\n")
        .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "terminal gone"))
        .build();
    let mut reader = AnswerReader::spawn(input);
    let mut out = Vec::new();

    let err = run_session(arithmetic(), global(Duration::from_secs(10)), &mut reader, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
}

#[tokio::test(start_paused = true)]
async fn test_closed_input_aborts_session() {
    let mut reader = AnswerReader::spawn(Builder::new().read(b"4\n").build());
    let mut out = Vec::new();

    let err = run_session(arithmetic(), per_question(Duration::from_secs(10)), &mut reader, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::InputClosed));
}
