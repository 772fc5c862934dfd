use std::fmt::Write;

use crossterm::style::Stylize;

use puzzle_parlor_core::*;

/// 把编排器的当前状态画成一屏文本
pub fn screen(arcade: &Arcade) -> String {
    let mut out = String::new();
    match (arcade.current(), arcade.active()) {
        (None, _) => menu(arcade, &mut out),
        (Some(GameKind::Sudoku), None) => sudoku_levels(arcade, &mut out),
        (Some(kind), Some(game)) => {
            let _ = writeln!(out, "{} {}", kind.icon(), arcade.t(kind.key()).bold());
            let _ = writeln!(out);
            match game {
                ActiveGame::Memory(engine) => memory(arcade, engine, &mut out),
                _ if game.is_loading() => {
                    let _ = writeln!(out, "{}", arcade.t("loading").dim());
                }
                ActiveGame::Quiz(session) => quiz(arcade, session, &mut out),
                ActiveGame::Anagram(engine) => anagram(arcade, engine, &mut out),
                ActiveGame::Sudoku(session) => sudoku(arcade, session, &mut out),
            }
        }
        (Some(_), None) => {
            let _ = writeln!(out, "{}", arcade.t("loading").dim());
        }
    }
    out
}

pub fn language_selector() -> String {
    format!(
        "{}\n  1) Türkçe  (lang tr)\n  2) English (lang en)\n",
        "Dil seçin / Choose a language".bold()
    )
}

fn menu(arcade: &Arcade, out: &mut String) {
    let _ = writeln!(out, "{}", arcade.t("mainTitle").bold().cyan());
    let _ = writeln!(out, "{}", arcade.t("mainSubtitle"));
    let _ = writeln!(out);
    for kind in GameKind::ALL {
        let desc = format!("{}Desc", kind.key());
        let _ = writeln!(
            out,
            "  {} {:<10} {}  {}",
            kind.icon(),
            kind.key(),
            arcade.t(kind.key()).bold(),
            arcade.t(&desc).dim()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "play <game> | lang {} | help | quit", arcade.locale().toggled());
}

fn sudoku_levels(arcade: &Arcade, out: &mut String) {
    let _ = writeln!(out, "{} {}", GameKind::Sudoku.icon(), arcade.t("sudoku").bold());
    let _ = writeln!(out, "{}:", arcade.t("difficulty"));
    for level in SudokuLevel::ALL {
        let _ = writeln!(out, "  new {:<6} {}", level.label(), arcade.t(level.key()));
    }
}

fn question_key(category: QuizCategory) -> &'static str {
    match category {
        QuizCategory::Plates => "whichCountryPlate",
        QuizCategory::Capitals => "whichCapital",
        QuizCategory::Cities => "whichCountryCity",
    }
}

fn quiz(arcade: &Arcade, session: &ChoiceQuizSession, out: &mut String) {
    if let Some(summary) = session.summary() {
        let _ = writeln!(out, "{}", arcade.t("gameOver").bold());
        let _ = writeln!(out, "{}: {}/{}", arcade.t("score"), summary.score, summary.total);
        let _ = writeln!(out, "{}: %{}", arcade.t("successRate"), summary.percentage);
        let _ = writeln!(out, "{}: {}", arcade.t("time"), format_clock(summary.elapsed_seconds));
        let _ = writeln!(out, "\nrestart | menu");
        return;
    }
    let Some(question) = session.current_question() else {
        return;
    };

    let _ = writeln!(
        out,
        "{} {}/{}   {}: {}   {}: {}",
        arcade.t("question"),
        session.progress().index() + 1,
        session.total(),
        arcade.t("score"),
        session.score(),
        arcade.t("time"),
        session.timer().format_clock()
    );
    let _ = writeln!(out, "{}", arcade.t(question_key(session.category())));
    let _ = writeln!(out, "\n  {}\n", question.prompt.as_str().bold().yellow());

    for (i, (option, mark)) in question.options.iter().zip(session.option_marks()).enumerate() {
        let label = format!("{}) {}", i + 1, option);
        let _ = match mark {
            OptionMark::Neutral => writeln!(out, "  {label}"),
            OptionMark::Correct => writeln!(out, "  {}", label.green().bold()),
            OptionMark::Wrong => writeln!(out, "  {}", label.red().crossed_out()),
        };
    }
}

fn memory(arcade: &Arcade, engine: &MemoryMatchEngine, out: &mut String) {
    if engine.setup().is_none() {
        let _ = writeln!(out, "{}:", arcade.t("theme"));
        for theme in Theme::ALL {
            let _ = writeln!(out, "  {:<9} {} {}", theme.key(), theme.icons()[0], arcade.t(theme.key()));
        }
        let _ = writeln!(out, "{}: easy | medium | hard", arcade.t("difficulty"));
        let _ = writeln!(out, "\nmemory <theme> <difficulty>");
        return;
    }

    let _ = writeln!(
        out,
        "{}: {}   {}: {}",
        arcade.t("moves"),
        engine.moves(),
        arcade.t("time"),
        engine.timer().format_clock()
    );
    let _ = writeln!(out);
    for row in engine.cards().chunks(engine.columns()) {
        let mut line = String::new();
        for card in row {
            let cell = if card.is_matched() {
                format!("{:>2} {}", card.id + 1, card.icon).green().to_string()
            } else if card.is_flipped() {
                format!("{:>2} {}", card.id + 1, card.icon).yellow().to_string()
            } else {
                format!("{:>2} {}", card.id + 1, "▒▒")
            };
            let _ = write!(line, "  {cell}");
        }
        let _ = writeln!(out, "{line}");
    }

    if let Some(done) = engine.completion() {
        let _ = writeln!(out, "\n{}", arcade.t("congratulations").bold().green());
        let _ = writeln!(
            out,
            "{}: {}   {}: {}",
            arcade.t("moves"),
            done.moves,
            arcade.t("time"),
            format_clock(done.elapsed_seconds)
        );
        let _ = writeln!(out, "\nrestart | theme | menu");
    }
}

fn anagram(arcade: &Arcade, engine: &AnagramAssemblyEngine, out: &mut String) {
    if engine.is_finished() {
        let _ = writeln!(out, "{}", arcade.t("gameOver").bold());
        let _ = writeln!(out, "{}: {}/{}", arcade.t("score"), engine.score(), engine.total());
        let _ = writeln!(out, "{}: %{}", arcade.t("successRate"), engine.percentage());
        let _ = writeln!(out, "\nrestart | menu");
        return;
    }

    let _ = writeln!(
        out,
        "{} {}/{}   {}: {}",
        arcade.t("question"),
        engine.progress().index() + 1,
        engine.total(),
        arcade.t("score"),
        engine.score()
    );
    let _ = writeln!(out, "{}\n", arcade.t("arrangeLetters"));

    let assembled: Vec<String> = engine.selected().map(|t| format!("[{}]", t.letter)).collect();
    let word = assembled.join(" ");
    let _ = match engine.last_result() {
        Some(true) => writeln!(out, "  {}  {}", word.green().bold(), arcade.t("correct").green()),
        Some(false) => writeln!(
            out,
            "  {}  {} {}: {}",
            word.red(),
            arcade.t("wrong").red(),
            arcade.t("correctAnswer"),
            engine.correct_word().unwrap_or_default().bold()
        ),
        None if word.is_empty() => writeln!(out, "  _"),
        None => writeln!(out, "  {word}"),
    };
    let _ = writeln!(out);

    let mut pool = String::new();
    for tile in engine.tiles() {
        let cell = format!("{}:{}", tile.id + 1, tile.letter);
        if tile.is_used {
            let _ = write!(pool, "  {}", cell.dim());
        } else {
            let _ = write!(pool, "  {}", cell.bold());
        }
    }
    let _ = writeln!(out, "{pool}");
}

fn sudoku(arcade: &Arcade, session: &GridEditSession, out: &mut String) {
    let _ = writeln!(
        out,
        "{}: {}   {}: {}",
        arcade.t("difficulty"),
        arcade.t(session.level().key()),
        arcade.t("time"),
        session.timer().format_clock()
    );
    let _ = writeln!(out, "\n     1 2 3   4 5 6   7 8 9");
    for row in 0..9 {
        if row % 3 == 0 {
            let _ = writeln!(out, "   +-------+-------+-------+");
        }
        let mut line = format!(" {} ", row + 1);
        for col in 0..9 {
            if col % 3 == 0 {
                line.push_str("| ");
            }
            let value = session.cell(row, col).unwrap_or_default();
            let cell = match value {
                0 => ".".to_string(),
                v if session.is_given(row, col) => v.to_string().bold().to_string(),
                v => v.to_string().cyan().to_string(),
            };
            let _ = write!(line, "{cell} ");
        }
        line.push('|');
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "   +-------+-------+-------+");

    if session.is_solved() {
        let _ = writeln!(out, "\n{}", arcade.t("congratulations").bold().green());
    } else if session.is_revealed() {
        let _ = writeln!(out, "\n{}", arcade.t("solution").dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_every_game() {
        let arcade = Arcade::new(Locale::En);
        let text = screen(&arcade);
        for kind in GameKind::ALL {
            assert!(text.contains(kind.key()));
        }
    }

    #[test]
    fn test_loading_screen_before_content() {
        let mut arcade = Arcade::new(Locale::En);
        arcade.select(GameKind::Capitals);
        assert!(screen(&arcade).contains(arcade.t("loading")));
    }
}
