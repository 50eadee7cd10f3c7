use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::entries::dto::Entry;
use crate::entries::handlers::EntryForm;
use crate::foods::handlers::FoodForm;
use crate::notify::Notice;
use crate::nutrition::handlers::{Dashboard, GoalsPane};
use crate::nutrition::services::parse_date;
use crate::state::AppState;
use crate::{auth, entries, foods, nutrition, views};

/// The four view regions. Switching is by explicit identifier and re-renders
/// from retained state without touching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Foods,
    Entries,
    Goals,
}

impl Tab {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "dashboard" => Some(Self::Dashboard),
            "foods" => Some(Self::Foods),
            "entries" => Some(Self::Entries),
            "goals" => Some(Self::Goals),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Command {
    Help,
    Quit,
    Register {
        name: String,
        email: String,
        password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    Tab(Tab),
    Foods,
    FoodsSearch(String),
    FoodsAdd(FoodForm),
    FoodsDelete(String),
    Entries,
    EntriesAdd(EntryForm),
    EntriesDelete(String),
    Summary(Option<String>),
    Goals,
    GoalsSet {
        calories: String,
        protein: String,
        carbs: String,
        fats: String,
    },
}

impl Command {
    /// Empty input is no command; anything unrecognized is a usage error.
    fn parse(line: &str) -> Result<Option<Command>, String> {
        let args = split_args(line);
        let parts: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match parts.as_slice() {
            [] => return Ok(None),
            ["help"] => Command::Help,
            ["quit"] | ["exit"] => Command::Quit,
            ["register", name, email, password] => Command::Register {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ["register", ..] => return Err("usage: register <name> <email> <password>".into()),
            ["login", email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ["login", ..] => return Err("usage: login <email> <password>".into()),
            ["logout"] => Command::Logout,
            ["tab", name] => match Tab::parse(name) {
                Some(tab) => Command::Tab(tab),
                None => return Err("tabs: dashboard, foods, entries, goals".into()),
            },
            ["foods"] => Command::Foods,
            ["foods", "search", query @ ..] => Command::FoodsSearch(query.join(" ")),
            ["foods", "add", name, category, calories, protein, carbs, fats, serving_size, serving_unit] => {
                Command::FoodsAdd(FoodForm {
                    name: name.to_string(),
                    category: category.to_string(),
                    calories: calories.to_string(),
                    protein: protein.to_string(),
                    carbs: carbs.to_string(),
                    fats: fats.to_string(),
                    serving_size: serving_size.to_string(),
                    serving_unit: serving_unit.to_string(),
                })
            }
            ["foods", "add", ..] => {
                return Err(
                    "usage: foods add <name> <category> <calories> <protein> <carbs> <fats> \
                     <serving size> <serving unit>"
                        .into(),
                )
            }
            ["foods", "delete", id] => Command::FoodsDelete(id.to_string()),
            ["foods", ..] => return Err("usage: foods [search <query> | add ... | delete <id>]".into()),
            ["entries"] => Command::Entries,
            ["entries", "add", food, quantity, meal_type, at @ ..] => {
                Command::EntriesAdd(EntryForm {
                    food: food.to_string(),
                    quantity: quantity.to_string(),
                    meal_type: meal_type.to_string(),
                    eaten_at: if at.is_empty() { None } else { Some(at.join(" ")) },
                })
            }
            ["entries", "add", ..] => {
                return Err("usage: entries add <food> <quantity> <meal type> [timestamp]".into())
            }
            ["entries", "delete", id] => Command::EntriesDelete(id.to_string()),
            ["entries", ..] => return Err("usage: entries [add ... | delete <id>]".into()),
            ["summary"] => Command::Summary(None),
            ["summary", date] => Command::Summary(Some(date.to_string())),
            ["summary", ..] => return Err("usage: summary [YYYY-MM-DD]".into()),
            ["goals"] => Command::Goals,
            ["goals", "set", calories, protein, carbs, fats] => Command::GoalsSet {
                calories: calories.to_string(),
                protein: protein.to_string(),
                carbs: carbs.to_string(),
                fats: fats.to_string(),
            },
            ["goals", ..] => return Err("usage: goals [set <calories> <protein> <carbs> <fats>]".into()),
            _ => return Err("unknown command, type help".into()),
        };
        Ok(Some(command))
    }

    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Help | Command::Quit | Command::Register { .. } | Command::Login { .. }
        )
    }
}

/// Split a command line into arguments, honoring double quotes so food names
/// with spaces survive.
fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

type Input = Lines<BufReader<Stdin>>;

/// The interactive event loop. One command in, at most one user-triggered
/// action out, then the affected region is re-rendered. Actions are awaited
/// before the next line is read, so requests never overlap.
pub struct Shell {
    state: AppState,
    tab: Tab,
    dashboard: Dashboard,
    goals: GoalsPane,
    entries_view: Vec<Entry>,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tab: Tab::Dashboard,
            dashboard: Dashboard::new(),
            goals: GoalsPane::new(),
            entries_view: Vec::new(),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        println!("nutrack - type help for commands");
        loop {
            prompt("> ")?;
            let Some(line) = input.next_line().await? else {
                break;
            };
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(usage) => {
                    println!("{}", Notice::failure(usage));
                    continue;
                }
            };
            if !self.dispatch(command, &mut input).await? {
                break;
            }
        }
        Ok(())
    }

    /// Returns false when the loop should stop.
    async fn dispatch(&mut self, command: Command, input: &mut Input) -> anyhow::Result<bool> {
        if command.requires_session() && !self.state.is_authenticated() {
            println!("{}", Notice::failure("not logged in (use register or login)"));
            return Ok(true);
        }

        match command {
            Command::Help => print_help(),
            Command::Quit => return Ok(false),
            Command::Register {
                name,
                email,
                password,
            } => {
                let notice = auth::handlers::register(&mut self.state, &name, &email, &password).await;
                println!("{notice}");
                if notice.is_success() {
                    self.after_login().await;
                }
            }
            Command::Login { email, password } => {
                let notice = auth::handlers::login(&mut self.state, &email, &password).await;
                println!("{notice}");
                if notice.is_success() {
                    self.after_login().await;
                }
            }
            Command::Logout => {
                let notice = auth::handlers::logout(&mut self.state);
                self.entries_view.clear();
                self.dashboard = Dashboard::new();
                self.goals = GoalsPane::new();
                println!("{notice}");
            }
            Command::Tab(tab) => {
                self.tab = tab;
                self.render_active();
            }
            Command::Foods => {
                self.tab = Tab::Foods;
                self.render_active();
            }
            Command::FoodsSearch(query) => {
                self.tab = Tab::Foods;
                print!("{}", views::render_foods(self.state.catalog(), Some(query.as_str())));
            }
            Command::FoodsAdd(form) => {
                let notice = foods::handlers::add_food(&self.state, &form).await;
                println!("{notice}");
                if notice.is_success() {
                    report_load(foods::handlers::reload_catalog(&mut self.state).await);
                    self.tab = Tab::Foods;
                    self.render_active();
                }
            }
            Command::FoodsDelete(id) => {
                if !confirm(input, "delete this food? (y/N) ").await? {
                    println!("cancelled");
                    return Ok(true);
                }
                let notice = foods::handlers::delete_food(&self.state, &id).await;
                println!("{notice}");
                if notice.is_success() {
                    report_load(foods::handlers::reload_catalog(&mut self.state).await);
                    self.tab = Tab::Foods;
                    self.render_active();
                }
            }
            Command::Entries => {
                self.tab = Tab::Entries;
                self.render_active();
            }
            Command::EntriesAdd(form) => {
                let notice = entries::handlers::add_entry(&self.state, &form).await;
                println!("{notice}");
                if notice.is_success() {
                    self.refresh_after_entry_change().await;
                    self.tab = Tab::Entries;
                    self.render_active();
                }
            }
            Command::EntriesDelete(id) => {
                if !confirm(input, "delete this entry? (y/N) ").await? {
                    println!("cancelled");
                    return Ok(true);
                }
                let notice = entries::handlers::delete_entry(&self.state, &id).await;
                println!("{notice}");
                if notice.is_success() {
                    self.refresh_after_entry_change().await;
                    self.tab = Tab::Entries;
                    self.render_active();
                }
            }
            Command::Summary(raw_date) => {
                let date = match raw_date {
                    Some(raw) => match parse_date(&raw) {
                        Some(date) => Some(date),
                        None => {
                            println!("{}", Notice::failure("date must be YYYY-MM-DD"));
                            return Ok(true);
                        }
                    },
                    None => None,
                };
                let notice =
                    nutrition::handlers::load_summary(&self.state, &mut self.dashboard, date).await;
                report_load(notice);
                self.tab = Tab::Dashboard;
                self.render_active();
            }
            Command::Goals => {
                self.tab = Tab::Goals;
                self.render_active();
            }
            Command::GoalsSet {
                calories,
                protein,
                carbs,
                fats,
            } => {
                let notice = nutrition::handlers::update_goals(
                    &self.state,
                    &mut self.goals,
                    &calories,
                    &protein,
                    &carbs,
                    &fats,
                )
                .await;
                println!("{notice}");
                if notice.is_success() {
                    self.tab = Tab::Goals;
                    self.render_active();
                }
            }
        }
        Ok(true)
    }

    /// All four regions load right after authentication, each as its own
    /// request with its own failure report.
    async fn after_login(&mut self) {
        report_load(foods::handlers::reload_catalog(&mut self.state).await);
        report_load(entries::handlers::load_entries(&self.state, &mut self.entries_view).await);
        report_load(nutrition::handlers::load_summary(&self.state, &mut self.dashboard, None).await);
        report_load(nutrition::handlers::load_goals(&self.state, &mut self.goals).await);
        self.tab = Tab::Dashboard;
        self.render_active();
    }

    /// Entry mutations refresh the list and the daily summary as two
    /// independent requests; one may fail while the other succeeds.
    async fn refresh_after_entry_change(&mut self) {
        report_load(entries::handlers::load_entries(&self.state, &mut self.entries_view).await);
        report_load(nutrition::handlers::load_summary(&self.state, &mut self.dashboard, None).await);
    }

    fn render_active(&self) {
        let rendered = match self.tab {
            Tab::Dashboard => views::render_dashboard(&self.dashboard),
            Tab::Foods => views::render_foods(self.state.catalog(), None),
            Tab::Entries => views::render_entries(&self.entries_view, self.state.catalog()),
            Tab::Goals => views::render_goals(&self.goals),
        };
        print!("{rendered}");
    }
}

/// Loads report only their failures; a successful load just re-renders.
fn report_load(notice: Notice) {
    if !notice.is_success() {
        println!("{notice}");
    }
}

async fn confirm(input: &mut Input, question: &str) -> anyhow::Result<bool> {
    prompt(question)?;
    let answer = input.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!(
        "commands:\n\
         \x20 register <name> <email> <password>\n\
         \x20 login <email> <password>\n\
         \x20 logout\n\
         \x20 tab <dashboard|foods|entries|goals>\n\
         \x20 foods                  show the cached catalog\n\
         \x20 foods search <query>   filter by name or category\n\
         \x20 foods add <name> <category> <calories> <protein> <carbs> <fats> <serving size> <serving unit>\n\
         \x20 foods delete <id>\n\
         \x20 entries                show logged entries\n\
         \x20 entries add <food> <quantity> <breakfast|lunch|dinner|snack> [timestamp]\n\
         \x20 entries delete <id>\n\
         \x20 summary [YYYY-MM-DD]   load the daily summary\n\
         \x20 goals                  show the goals form\n\
         \x20 goals set <calories> <protein> <carbs> <fats>\n\
         \x20 quit"
    );
}
