//! The `quizdeck take` command: an interactive session driven by menus,
//! or a one-shot run when `--answers` is given.

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use inquire::{InquireError, Select};
use rand::Rng;

use quizdeck_core::error::QuizError;
use quizdeck_core::model::{Label, QuestionBank, StatusMap};
use quizdeck_core::scoring::ScoreCard;
use quizdeck_core::selector::remaining;
use quizdeck_core::session::{QuizSession, SelectionChange, SessionConfig};
use quizdeck_core::store::{KeyValueStore, StatusStore};
use quizdeck_core::view::{nav_panel, question_views};
use quizdeck_loader::config::load_config_from;
use quizdeck_report::html::{write_html_report, HtmlPage};
use quizdeck_report::table::nav_grid;
use quizdeck_report::text::{format_questions, format_scorecard, format_totals};

const MENU_PAGE_SIZE: usize = 15;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    page: String,
    bank: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    store_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    answers: Vec<AnswerArg>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let session_config = super::session_config(&config, count)?;
    let bank = super::fetch_bank(&config, &page, bank.as_deref()).await?;
    let store = super::open_store(&config, store_path)?;

    let reports = output.map(|dir| ReportOutput::new(dir, &format));
    let mut repl = Repl::new(page, bank, store, session_config, super::make_rng(seed), reports);

    let mut out = std::io::stdout().lock();
    if answers.is_empty() {
        repl.run(&mut InquirePrompter, &mut out)
    } else {
        repl.answer_all(&answers, &mut out)
    }
}

/// One `--answers` entry: a 1-based question number and a label, e.g. `3B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerArg {
    pub number: usize,
    pub label: Label,
}

impl FromStr for AnswerArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || format!("expected <question><label> such as 3B, got `{s}`");
        let split = s.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
        let (number, label) = s.split_at(split);
        let number = number
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(invalid)?;
        let label = label.trim().parse::<Label>().map_err(|_| invalid())?;
        Ok(Self { number, label })
    }
}

/// Chooses one item from a list. `None` means the user backed out.
pub trait Prompter {
    fn pick(&mut self, message: &str, items: &[String]) -> Result<Option<usize>>;
}

/// Arrow-key menus on the terminal.
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn pick(&mut self, message: &str, items: &[String]) -> Result<Option<usize>> {
        let choice = Select::new(message, items.to_vec())
            .with_page_size(MENU_PAGE_SIZE)
            .raw_prompt();
        match choice {
            Ok(option) => Ok(Some(option.index)),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Where checked sessions are written.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    dir: PathBuf,
    formats: Vec<String>,
}

impl ReportOutput {
    pub fn new(dir: PathBuf, format: &str) -> Self {
        let formats = if format == "all" {
            vec!["json".to_string(), "html".to_string()]
        } else {
            format.split(',').map(|f| f.trim().to_string()).collect()
        };
        Self { dir, formats }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Question(usize),
    Check,
    Show,
    Nav,
    Restart,
    Reset,
    Quit,
}

const ACTIONS: [(&str, Action); 6] = [
    ("Check answers", Action::Check),
    ("Show questions", Action::Show),
    ("Navigation panel", Action::Nav),
    ("Restart", Action::Restart),
    ("Reset page", Action::Reset),
    ("Quit", Action::Quit),
];

enum Step {
    Continue,
    Quit,
}

/// The answering loop. Owns the session and writes statuses through
/// `store` once per check and once per reset.
pub struct Repl<S, R> {
    page: String,
    bank: QuestionBank,
    store: StatusStore<S>,
    statuses: StatusMap,
    config: SessionConfig,
    rng: R,
    session: QuizSession,
    reports: Option<ReportOutput>,
}

impl<S: KeyValueStore, R: Rng> Repl<S, R> {
    pub fn new(
        page: String,
        bank: QuestionBank,
        store: StatusStore<S>,
        config: SessionConfig,
        mut rng: R,
        reports: Option<ReportOutput>,
    ) -> Self {
        let statuses = store.load(&page);
        let session = QuizSession::start(page.as_str(), &bank, &statuses, &config, &mut rng);
        Self {
            page,
            bank,
            store,
            statuses,
            config,
            rng,
            session,
            reports,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    pub fn store(&self) -> &StatusStore<S> {
        &self.store
    }

    /// Offer the menu until the user quits or backs out of it.
    pub fn run<P: Prompter, O: Write>(&mut self, prompter: &mut P, out: &mut O) -> Result<()> {
        self.intro(out)?;
        loop {
            out.flush()?;
            let (items, actions) = self.menu();
            let action = prompter
                .pick("Choose a question or an action:", &items)?
                .and_then(|i| actions.get(i).copied());
            let Some(action) = action else {
                break;
            };
            if let Step::Quit = self.handle(action, prompter, out)? {
                break;
            }
        }
        Ok(())
    }

    /// Select every answer, then check once.
    pub fn answer_all<O: Write>(&mut self, answers: &[AnswerArg], out: &mut O) -> Result<()> {
        self.intro(out)?;
        for answer in answers {
            self.select(answer.number, answer.label, out)?;
        }
        self.check(out)
    }

    fn intro<O: Write>(&self, out: &mut O) -> Result<()> {
        if self.session.is_empty() {
            writeln!(
                out,
                "{}: no questions left to answer ({} in the bank). Reset the page to start over.",
                self.page,
                self.bank.len()
            )?;
            return Ok(());
        }
        writeln!(
            out,
            "{}: {} questions ({} of {} still to answer correctly).\n",
            self.page,
            self.session.len(),
            remaining(&self.bank, &self.statuses),
            self.bank.len()
        )?;
        writeln!(out, "{}", format_questions(&question_views(&self.session)))?;
        Ok(())
    }

    /// One entry per session question, then the fixed actions.
    fn menu(&self) -> (Vec<String>, Vec<Action>) {
        let mut items = Vec::new();
        let mut actions = Vec::new();
        for (i, q) in self.session.questions().iter().enumerate() {
            let mut item = format!("Question {} [#{}]: {}", i + 1, q.id(), q.question.heading);
            if let Some(label) = self.session.selection(i) {
                item.push_str(&format!(" ({label})"));
            }
            items.push(item);
            actions.push(Action::Question(i));
        }
        for (name, action) in ACTIONS {
            items.push(name.to_string());
            actions.push(action);
        }
        (items, actions)
    }

    fn handle<P: Prompter, O: Write>(
        &mut self,
        action: Action,
        prompter: &mut P,
        out: &mut O,
    ) -> Result<Step> {
        match action {
            Action::Question(index) => self.answer(index, prompter, out)?,
            Action::Check => self.check(out)?,
            Action::Show => {
                writeln!(out, "{}", format_questions(&question_views(&self.session)))?
            }
            Action::Nav => {
                let panel = nav_panel(&self.bank, &self.statuses);
                writeln!(out, "{}", nav_grid(&panel))?;
                writeln!(out, "{}", format_totals(&panel))?;
            }
            Action::Restart => {
                self.restart();
                self.intro(out)?;
            }
            Action::Reset => {
                self.store.clear(&self.page)?;
                writeln!(out, "Statuses for {} cleared.", self.page)?;
                self.restart();
                self.intro(out)?;
            }
            Action::Quit => return Ok(Step::Quit),
        }
        Ok(Step::Continue)
    }

    /// Option picker for the question at zero-based `index`.
    fn answer<P: Prompter, O: Write>(
        &mut self,
        index: usize,
        prompter: &mut P,
        out: &mut O,
    ) -> Result<()> {
        if self.session.is_checked() {
            return self.frozen(out);
        }
        let Some(q) = self.session.questions().get(index) else {
            return Ok(());
        };
        if !q.question.body.is_empty() {
            writeln!(out, "{}", q.question.body)?;
        }

        let selected = self.session.selection(index);
        let mut items: Vec<String> = q
            .options
            .iter()
            .map(|o| {
                let mark = if selected == Some(o.label) { " (selected)" } else { "" };
                format!("{}) {}{mark}", o.label, o.text)
            })
            .collect();
        let labels: Vec<Label> = q.options.iter().map(|o| o.label).collect();
        items.push("Back".to_string());

        let message = format!("Question {}: {}", index + 1, q.question.heading);
        if let Some(label) = prompter
            .pick(&message, &items)?
            .and_then(|i| labels.get(i).copied())
        {
            self.select(index + 1, label, out)?;
        }
        Ok(())
    }

    /// Toggle `label` on the question numbered `number` (1-based).
    fn select<O: Write>(&mut self, number: usize, label: Label, out: &mut O) -> Result<()> {
        match self.session.select(number.saturating_sub(1), label) {
            Ok(SelectionChange::Selected(label)) => {
                writeln!(out, "Question {number}: {label} selected.")?
            }
            Ok(SelectionChange::Cleared) => writeln!(out, "Question {number}: selection cleared.")?,
            Ok(SelectionChange::Frozen) => self.frozen(out)?,
            Err(QuizError::NoSuchQuestion { len, .. }) => writeln!(
                out,
                "There is no question {number} (this session has {len})."
            )?,
            Err(QuizError::NoSuchOption { label, .. }) => {
                writeln!(out, "Question {number} has no option {label}.")?
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn frozen<O: Write>(&self, out: &mut O) -> Result<()> {
        writeln!(out, "Answers are already checked. Restart for a new session.")?;
        Ok(())
    }

    fn check<O: Write>(&mut self, out: &mut O) -> Result<()> {
        if self.session.is_checked() {
            writeln!(out, "Answers are already checked.")?;
            if let Some(card) = self.session.scorecard() {
                writeln!(out, "{}", format_scorecard(&card))?;
            }
            return Ok(());
        }

        let card = self.session.check(&mut self.statuses);
        self.store.save(&self.page, &self.statuses)?;

        writeln!(out, "{}", format_questions(&question_views(&self.session)))?;
        writeln!(out, "{}", format_scorecard(&card))?;

        if let Some(reports) = &self.reports {
            self.write_reports(reports, &card)?;
        }
        Ok(())
    }

    fn write_reports(&self, reports: &ReportOutput, card: &ScoreCard) -> Result<()> {
        let Some(report) = self.session.report() else {
            return Ok(());
        };
        std::fs::create_dir_all(&reports.dir)?;
        let stem = format!(
            "session-{}-{}",
            report.created_at.format("%Y-%m-%dT%H%M%S"),
            &report.id.simple().to_string()[..8]
        );

        for fmt in &reports.formats {
            match fmt.as_str() {
                "json" => {
                    let path = reports.dir.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Report saved to: {}", path.display());
                }
                "html" => {
                    let path = reports.dir.join(format!("{stem}.html"));
                    let views = question_views(&self.session);
                    let nav = nav_panel(&self.bank, &self.statuses);
                    write_html_report(
                        &HtmlPage {
                            title: &self.page,
                            questions: &views,
                            nav: &nav,
                            card: Some(card),
                        },
                        &path,
                    )?;
                    eprintln!("HTML report: {}", path.display());
                }
                _ => {
                    eprintln!("Unknown format: {fmt}");
                }
            }
        }
        Ok(())
    }

    /// Fresh session from the current statuses.
    fn restart(&mut self) {
        self.statuses = self.store.load(&self.page);
        self.session = QuizSession::start(
            self.page.as_str(),
            &self.bank,
            &self.statuses,
            &self.config,
            &mut self.rng,
        );
    }
}
