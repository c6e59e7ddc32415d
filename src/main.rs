use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing_subscriber::EnvFilter;

use trivia::app::{App, AppScreen};
use trivia::config::{Config, Overrides};
use trivia::engine::scoring::{progress_percent, total_possible_score};
use trivia::event::{AppEvent, EventHandler};
use trivia::session::question::{Difficulty, QuestionSet};
use trivia::store::question_store::{self, QuestionSource};
use trivia::ui::components::confirm_dialog::ConfirmDialog;
use trivia::ui::components::feedback_panel::FeedbackPanel;
use trivia::ui::components::menu::MenuAction;
use trivia::ui::components::progress_bar::ProgressBar;
use trivia::ui::components::question_card::QuestionCard;
use trivia::ui::components::score_card::ScoreCard;
use trivia::ui::components::summary::Summary;
use trivia::ui::layout::{QuizLayout, centered_rect, pack_hint_lines};
use trivia::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "trivia", version, about = "Terminal trivia quiz with difficulty-weighted scoring")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Bundled question set (general, rust)")]
    set: Option<String>,

    #[arg(short, long, value_name = "PATH", help = "Load questions from a JSON file")]
    questions: Option<PathBuf>,

    #[arg(long, help = "Seed for the feedback message picker")]
    seed: Option<u64>,

    #[arg(long, help = "Validate the question set and exit")]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging();

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::default()
    });
    let themes = Theme::available_themes();
    let sets = question_store::bundled_sets();
    config.validate(&themes, &sets);

    let mut overrides = Overrides {
        theme: cli.theme,
        question_set: cli.set,
        questions_path: cli.questions,
    };
    overrides.check(&themes, &sets)?;

    let source = config.with_overrides(&overrides).question_source();
    let questions = source
        .load()
        .with_context(|| format!("loading questions from {}", source.describe()))?;

    if cli.check {
        print_check_report(&source, &questions);
        return Ok(());
    }

    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(config, overrides, questions, source, rng);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "exiting after error");
        eprintln!("Error: {err:?}");
        if let Some(path) = log_path {
            eprintln!("Log: {}", path.display());
        }
    }

    Ok(())
}

/// Log to a file under the data dir; the terminal belongs to the UI.
fn init_logging() -> Option<PathBuf> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trivia");
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("trivia.log");
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter =
        EnvFilter::try_from_env("TRIVIA_LOG").unwrap_or_else(|_| EnvFilter::new("trivia=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Some(path)
}

fn print_check_report(source: &QuestionSource, questions: &QuestionSet) {
    println!("{}: {} questions OK", source.describe(), questions.len());
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let count = questions
            .iter()
            .filter(|q| q.difficulty_level == difficulty)
            .count();
        println!(
            "  {difficulty:<6} x{count:<3} ({} pt each)",
            difficulty.points()
        );
    }
    println!("  total possible score: {}", total_possible_score(questions));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.restart_prompt_open {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.back_to_start(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_restart(),
            _ => {}
        }
        return;
    }

    match app.screen() {
        AppScreen::Welcome => handle_welcome_key(app, key),
        AppScreen::Question => handle_question_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_welcome_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') => app.start_quiz(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter | KeyCode::Char(' ') => match app.menu.selected_action() {
            MenuAction::Start => app.start_quiz(),
            MenuAction::Settings => app.go_to_settings(),
            MenuAction::Quit => app.should_quit = true,
        },
        _ => {}
    }
}

fn handle_question_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.request_restart(),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Char(ch @ '1'..='9') => {
            let index = (ch as u8 - b'1') as usize;
            app.pick_option(index);
        }
        KeyCode::Char(' ') => app.select_at_cursor(),
        KeyCode::Char('c') => app.confirm_answer(),
        KeyCode::Enter => app.activate(),
        KeyCode::Char('n') | KeyCode::Right => app.next_question(),
        KeyCode::Char('s') => app.skip_question(),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('b') | KeyCode::Esc => app.back_to_start(),
        KeyCode::Char('r') => app.start_quiz(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            if let Err(e) = app.config.save() {
                tracing::warn!(error = %e, "could not save config");
            }
            app.close_settings();
        }
        KeyCode::Up | KeyCode::Char('k') => app.settings_up(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_down(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen() {
        AppScreen::Welcome => render_welcome(frame, app),
        AppScreen::Question => render_question(frame, app),
        AppScreen::Summary => render_summary(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }

    if app.restart_prompt_open {
        let dialog_area = centered_rect(40, 30, area);
        frame.render_widget(
            ConfirmDialog {
                title: "Restart quiz?",
                message: "Your score and progress for this attempt will be lost.",
                theme: app.theme,
            },
            dialog_area,
        );
    }
}

fn header_line<'a>(title: &'a str, info: String, app: &App) -> Paragraph<'a> {
    let colors = &app.theme.colors;
    Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
}

fn footer_hints<'a>(lines: Vec<String>, app: &App) -> Paragraph<'a> {
    let style = Style::default().fg(app.theme.colors.text_muted());
    Paragraph::new(
        lines
            .into_iter()
            .map(|text| Line::from(Span::styled(text, style)))
            .collect::<Vec<_>>(),
    )
}

fn render_welcome(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let hint_lines = pack_hint_lines(
        &["[Enter] Select", "[j/k] Navigate", "[c] Settings", "[q] Quit"],
        area.width as usize,
    );
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(hint_lines.len() as u16),
        ])
        .split(area);

    let questions = app.engine.questions();
    let info = format!(
        " {} questions | {} points | {}",
        questions.len(),
        app.engine.total_possible_score(),
        app.source.describe(),
    );
    frame.render_widget(header_line(" trivia ", info, app), layout[0]);

    let menu_area = centered_rect(50, 70, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(colors.error()),
        )));
        frame.render_widget(status, layout[2]);
    }

    frame.render_widget(footer_hints(hint_lines, app), layout[3]);
}

fn render_question(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let engine = &app.engine;
    let Some(question) = engine.current_question() else {
        return;
    };
    let state = engine.state();
    let total = engine.questions().len();
    let index = engine.current_question_index().unwrap_or(0);
    let confirmed = state.is_answer_confirmed();

    let hints: &[&str] = if confirmed {
        &["[Enter/n] Continue", "[Esc] Restart"]
    } else {
        &[
            "[1-9] Pick",
            "[j/k] Move",
            "[Enter] Select/Confirm",
            "[s] Skip",
            "[Esc] Restart",
        ]
    };
    let hint_lines = pack_hint_lines(hints, QuizLayout::content_width(area) as usize);

    let feedback = app.feedback.zip(engine.last_answer_correct());
    let layout = QuizLayout::new(area, feedback.is_some(), hint_lines.len() as u16);

    let info = format!(
        " Question {}/{} | Score {} | \u{23F1} {}",
        index + 1,
        total,
        state.score(),
        engine.elapsed(),
    );
    frame.render_widget(header_line(" trivia ", info, app), layout.header);

    frame.render_widget(
        QuestionCard::new(
            question,
            state.selected_answer_index(),
            confirmed,
            app.option_cursor,
            app.theme,
        ),
        layout.card,
    );

    if let (Some((fb, correct)), Some(fb_area)) = (feedback, layout.feedback) {
        let reveal = app
            .config
            .reveal_correct_answer
            .then(|| question.correct_option());
        frame.render_widget(FeedbackPanel::new(fb, correct, reveal, app.theme), fb_area);
    }

    frame.render_widget(
        ScoreCard {
            score: state.score(),
            total_possible: engine.total_possible_score(),
            index,
            total_questions: total,
            confirmed,
            is_last: engine.is_last_question(),
            theme: app.theme,
        },
        layout.score,
    );

    if let Some(progress_area) = layout.progress {
        let bar = ProgressBar::new("Progress", progress_percent(index, total), app.theme)
            .caption(format!("Question {} of {total}", index + 1));
        frame.render_widget(bar, progress_area);
    }

    frame.render_widget(footer_hints(hint_lines, app), layout.footer);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let engine = &app.engine;
    let summary = Summary::new(
        engine.state().score(),
        engine.total_possible_score(),
        engine.questions().len(),
        engine.elapsed(),
        app.theme,
    );
    frame.render_widget(summary, centered_rect(60, 50, area));
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields = app.settings_fields();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change",
        Style::default().fg(colors.text_muted()),
    )))
    .render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.selected()
        } else {
            colors.text_muted()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("    < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    Paragraph::new(Line::from(Span::styled(
        "  [Esc] Save & back",
        Style::default().fg(colors.accent()),
    )))
    .render(layout[3], frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use trivia::store::question_store::DEFAULT_SET;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_app() -> App {
        let source = QuestionSource::Bundled(DEFAULT_SET.to_string());
        let questions = source.load().unwrap();
        App::new(
            Config::default(),
            Overrides::default(),
            questions,
            source,
            SmallRng::seed_from_u64(9),
        )
    }

    #[test]
    fn test_number_keys_pick_and_enter_confirms() {
        let mut app = make_app();
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.screen(), AppScreen::Question);

        let correct = app.engine.current_question().unwrap().correct_answer;
        let digit = char::from(b'1' + correct as u8);
        handle_key(&mut app, press(KeyCode::Char(digit)));
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.engine.state().is_answer_confirmed());
        assert!(app.engine.state().score() > 0);
    }

    #[test]
    fn test_escape_asks_before_restart() {
        let mut app = make_app();
        handle_key(&mut app, press(KeyCode::Char('s')));
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.restart_prompt_open);

        // Keys meant for the quiz are swallowed by the prompt.
        handle_key(&mut app, press(KeyCode::Char('s')));
        assert_eq!(app.engine.current_question_index(), Some(0));

        handle_key(&mut app, press(KeyCode::Char('y')));
        assert_eq!(app.screen(), AppScreen::Welcome);
    }

    #[test]
    fn test_skip_through_to_summary_and_back() {
        let mut app = make_app();
        handle_key(&mut app, press(KeyCode::Char('s')));
        let total = app.engine.questions().len();
        for _ in 0..total {
            handle_key(&mut app, press(KeyCode::Char('s')));
        }
        assert_eq!(app.screen(), AppScreen::Summary);
        assert_eq!(app.engine.state().score(), 0);

        handle_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(app.screen(), AppScreen::Question);
        assert_eq!(app.engine.current_question_index(), Some(0));
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buf = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_narrow_terminal_keeps_every_hint() {
        let mut app = make_app();
        app.start_quiz();
        let text = screen_text(&app, 40, 30);
        for hint in ["[1-9] Pick", "[s] Skip", "[Esc] Restart"] {
            assert!(text.contains(hint), "missing {hint}");
        }
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = make_app();
        app.start_quiz();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
