/// 基于 proptest 的不变量测试
///
/// 随机生成操作序列，验证每一步之后引擎的不变量依然成立。
use proptest::prelude::*;
use puzzle_parlor_core::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn sorted_chars(s: impl Iterator<Item = char>) -> Vec<char> {
    let mut v: Vec<char> = s.collect();
    v.sort_unstable();
    v
}

// 单词：2 到 8 个字母
fn word_strategy() -> impl Strategy<Value = String> {
    "[A-Za-zÇŞĞÜÖİ]{2,8}"
}

#[derive(Debug, Clone)]
enum WordOp {
    Select(usize),
    Deselect(usize),
    Submit,
    Fire,
}

fn word_op_strategy() -> impl Strategy<Value = WordOp> {
    prop_oneof![
        (0usize..10).prop_map(WordOp::Select),
        (0usize..10).prop_map(WordOp::Deselect),
        Just(WordOp::Submit),
        Just(WordOp::Fire),
    ]
}

#[derive(Debug, Clone)]
enum QuizOp {
    Answer(usize),
    Fire,
}

fn quiz_op_strategy() -> impl Strategy<Value = QuizOp> {
    prop_oneof![(0usize..4).prop_map(QuizOp::Answer), Just(QuizOp::Fire)]
}

#[derive(Debug, Clone)]
enum CardOp {
    Flip(usize),
    Fire,
}

fn card_op_strategy() -> impl Strategy<Value = CardOp> {
    prop_oneof![3 => (0usize..24).prop_map(CardOp::Flip), 1 => Just(CardOp::Fire)]
}

proptest! {
    #[test]
    fn test_letter_multiset_is_preserved(
        words in prop::collection::vec(word_strategy(), 1..4),
        ops in prop::collection::vec(word_op_strategy(), 0..60),
    ) {
        let challenges: Vec<Challenge> = words
            .iter()
            .map(|w| Challenge { scrambled_word: w.chars().rev().collect(), correct_word: w.clone() })
            .collect();
        let mut engine = AnagramAssemblyEngine::new(Locale::Tr);
        engine.load_challenges(challenges.clone()).unwrap();
        let mut pending: Option<Ticket> = None;

        for op in ops {
            match op {
                WordOp::Select(id) => { engine.select_tile(id); }
                WordOp::Deselect(pos) => { engine.deselect_at(pos); }
                WordOp::Submit => {
                    let before = engine.score();
                    if let Some(d) = engine.submit() {
                        pending = Some(d.ticket);
                    }
                    prop_assert!(engine.score() >= before);
                }
                WordOp::Fire => {
                    if let Some(ticket) = pending.take() {
                        engine.resolve(ticket);
                    }
                }
            }

            if engine.is_finished() {
                break;
            }
            let scrambled = &challenges[engine.progress().index()].scrambled_word;
            let used = engine.tiles().iter().filter(|t| t.is_used).count();
            prop_assert_eq!(used, engine.selected_len());

            let pool = engine.tiles().iter().filter(|t| !t.is_used).map(|t| t.letter);
            let letters = sorted_chars(pool.chain(engine.selected().map(|t| t.letter)));
            prop_assert_eq!(letters, sorted_chars(scrambled.chars()));
            prop_assert!(engine.score() as usize <= engine.progress().index() + 1);
        }
    }

    #[test]
    fn test_quiz_score_bounded_by_index(
        correct in prop::collection::vec(0usize..4, 1..8),
        ops in prop::collection::vec(quiz_op_strategy(), 0..40),
    ) {
        let questions: Vec<Question> = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let options: Vec<String> = (0..4).map(|o| format!("{i}-{o}")).collect();
                Question { prompt: format!("Q{i}"), correct_answer: options[c].clone(), options }
            })
            .collect();
        let mut session = ChoiceQuizSession::new(QuizCategory::Plates, Locale::En);
        session.load(questions.clone()).unwrap();
        let mut pending = None;
        let mut last_score = 0;

        for op in ops {
            match op {
                QuizOp::Answer(o) => {
                    let idx = session.progress().index();
                    if let Some(d) = session.submit_answer(&questions[idx].options[o]) {
                        pending = Some(d.ticket);
                        prop_assert!(session.score() as usize <= session.progress().index() + 1);
                    }
                }
                QuizOp::Fire => {
                    if let Some(t) = pending.take() {
                        session.resolve(t);
                    }
                }
            }
            prop_assert!(session.score() >= last_score);
            last_score = session.score();
        }
    }

    #[test]
    fn test_memory_parity_and_disjointness(
        seed in any::<u64>(),
        hard in any::<bool>(),
        ops in prop::collection::vec(card_op_strategy(), 0..120),
    ) {
        let difficulty = if hard { Difficulty::Hard } else { Difficulty::Easy };
        let mut engine = MemoryMatchEngine::new();
        engine.new_game_with_rng(Theme::Vehicles, difficulty, &mut StdRng::seed_from_u64(seed));
        let mut pending = None;

        for op in ops {
            match op {
                CardOp::Flip(id) => {
                    if let FlipOutcome::Mismatched(d) = engine.flip(id) {
                        pending = Some(d.ticket);
                    }
                }
                CardOp::Fire => {
                    if let Some(t) = pending.take() {
                        engine.resolve(t);
                    }
                }
            }

            let matched: HashSet<CardId> = engine.cards().iter().filter(|c| c.is_matched()).map(|c| c.id).collect();
            prop_assert_eq!(matched.len() % 2, 0);
            prop_assert_eq!(matched.len(), engine.matched_count());
            prop_assert!(engine.flipped().len() <= 2);
            prop_assert!(engine.flipped().iter().all(|id| !matched.contains(id)));
        }
    }

    #[test]
    fn test_shuffle_keeps_pairs(seed in any::<u64>()) {
        let mut engine = MemoryMatchEngine::new();
        engine.new_game_with_rng(Theme::Fruits, Difficulty::Easy, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(engine.cards().len(), 12);
        for icon in &Theme::Fruits.icons()[..6] {
            prop_assert_eq!(engine.cards().iter().filter(|c| c.icon == *icon).count(), 2);
        }
    }

    #[test]
    fn test_given_cells_never_change(row in 0usize..9, col in 0usize..9, value in 0u8..=9) {
        let solution: Grid = std::array::from_fn(|r| std::array::from_fn(|c| ((r * 3 + r / 3 + c) % 9 + 1) as u8));
        let mut puzzle = solution;
        puzzle[0] = [0; 9];
        let mut session = GridEditSession::new(SudokuLevel::Easy);
        session.load(SudokuPuzzle { puzzle, solution }).unwrap();

        let before = *session.working();
        let accepted = session.set_cell(row, col, value);
        prop_assert_eq!(accepted, row == 0);
        if !accepted {
            prop_assert_eq!(*session.working(), before);
        }
    }
}
