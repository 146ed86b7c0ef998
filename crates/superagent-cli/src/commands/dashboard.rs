//! Interactive REPL for the panel dashboard.

use std::sync::Arc;

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use superagent_application::messages;
use superagent_application::panels::jobs::JobForm;
use superagent_application::panels::project::ProjectForm;
use superagent_application::{ActivePanel, AuthGate, NavigationShell, Page};
use superagent_core::config::ClientConfig;
use superagent_core::job::JobId;
use superagent_core::{DashboardApi, SessionContext};
use superagent_interaction::DashboardClient;
use tokio::sync::mpsc;

use crate::helper::{CliHelper, CommandSpec};
use crate::render;

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "/go", usage: "<pagina>", about: "apre una sezione" },
    CommandSpec { name: "/view", usage: "", about: "mostra la sezione corrente" },
    CommandSpec { name: "/refresh", usage: "", about: "ricarica i dati della sezione" },
    CommandSpec { name: "/job", usage: "<agent_id> [config JSON]", about: "avvia un job distribuito" },
    CommandSpec { name: "/show", usage: "<job_id>", about: "dettagli di un job" },
    CommandSpec { name: "/project", usage: "[nome | descrizione | tipo]", about: "crea un progetto grafico/web" },
    CommandSpec { name: "/scan", usage: "", about: "scansiona le applicazioni" },
    CommandSpec { name: "/select", usage: "<app>", about: "seleziona un'applicazione" },
    CommandSpec { name: "/start", usage: "", about: "avvia l'applicazione selezionata" },
    CommandSpec { name: "/ps", usage: "", about: "aggiorna la lista processi" },
    CommandSpec { name: "/kill", usage: "<pid>", about: "termina un processo" },
    CommandSpec { name: "/authorize", usage: "<app> <consenti|blocca>", about: "aggiorna un'autorizzazione" },
    CommandSpec { name: "/log", usage: "<azione> <risultato>", about: "registra un'azione" },
    CommandSpec { name: "/toggle", usage: "", about: "attiva o disattiva il watchdog" },
    CommandSpec { name: "/limit", usage: "<soglia>", about: "imposta la soglia di spesa" },
    CommandSpec { name: "/movement", usage: "<importo> [descrizione]", about: "aggiunge un movimento" },
    CommandSpec { name: "/logout", usage: "", about: "termina la sessione" },
    CommandSpec { name: "/help", usage: "", about: "questo elenco" },
    CommandSpec { name: "/quit", usage: "", about: "esce" },
];

const NOT_ON_THIS_PAGE: &str = "Comando non disponibile in questa sezione";
const UNKNOWN_COMMAND: &str = "Comando sconosciuto, digita /help";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Go(Page),
    View,
    Refresh,
    CreateJob(JobForm),
    ShowJob(JobId),
    CreateProject(ProjectForm),
    Scan,
    Select(String),
    Start,
    Ps,
    Kill(u32),
    Authorize { app: String, allow: bool },
    LogAction { action: String, result: String },
    Toggle,
    Limit(String),
    Movement { amount: String, desc: String },
    /// Plain text; a chat message on the chat page.
    Text(String),
    Logout,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    if !line.starts_with('/') {
        return Ok(Command::Text(line.to_string()));
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let usage = || {
        COMMANDS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| format!("Uso: {} {}", spec.name, spec.usage))
            .unwrap_or_else(|| UNKNOWN_COMMAND.to_string())
    };
    let required = |value: &str| {
        if value.is_empty() {
            Err(usage())
        } else {
            Ok(value.to_string())
        }
    };

    let command = match name {
        "/go" => Command::Go(rest.parse().map_err(|_| usage())?),
        "/view" => Command::View,
        "/refresh" => Command::Refresh,
        "/job" => {
            let (agent_id, config) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let config = config.trim();
            Command::CreateJob(JobForm {
                agent_id: agent_id.to_string(),
                config: if config.is_empty() { "{}".to_string() } else { config.to_string() },
            })
        }
        "/show" => Command::ShowJob(JobId::new(required(rest)?)),
        "/project" => Command::CreateProject(parse_project(rest)?),
        "/scan" => Command::Scan,
        "/select" => Command::Select(required(rest)?),
        "/start" => Command::Start,
        "/ps" => Command::Ps,
        "/kill" => Command::Kill(rest.parse().map_err(|_| usage())?),
        "/authorize" => {
            let (app, choice) = rest.rsplit_once(char::is_whitespace).ok_or_else(usage)?;
            let allow = match choice {
                "consenti" | "allow" | "true" => true,
                "blocca" | "deny" | "false" => false,
                _ => return Err(usage()),
            };
            Command::Authorize {
                app: app.trim().to_string(),
                allow,
            }
        }
        "/log" => {
            let (action, result) = rest.split_once(char::is_whitespace).ok_or_else(usage)?;
            Command::LogAction {
                action: action.to_string(),
                result: result.trim().to_string(),
            }
        }
        "/toggle" => Command::Toggle,
        "/limit" => Command::Limit(rest.to_string()),
        "/movement" => {
            let (amount, desc) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Command::Movement {
                amount: amount.to_string(),
                desc: desc.trim().to_string(),
            }
        }
        "/logout" => Command::Logout,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => return Err(UNKNOWN_COMMAND.to_string()),
    };
    Ok(command)
}

/// `nome | descrizione | tipo`; omitted parts keep the form defaults.
fn parse_project(rest: &str) -> std::result::Result<ProjectForm, String> {
    let mut form = ProjectForm::default();
    if rest.is_empty() {
        return Ok(form);
    }
    let mut parts = rest.split('|').map(str::trim);
    if let Some(nome) = parts.next() {
        form.nome = nome.to_string();
    }
    if let Some(descrizione) = parts.next() {
        form.descrizione = descrizione.to_string();
    }
    if let Some(tipo) = parts.next() {
        form.tipo = tipo.parse().map_err(|_| format!("Tipo non valido: {}", tipo))?;
    }
    Ok(form)
}

pub async fn run(config: &ClientConfig) -> Result<()> {
    let api: Arc<dyn DashboardApi> = Arc::new(DashboardClient::new(&config.dashboard)?);
    let session = SessionContext::new();
    let gate = AuthGate::new(api.clone(), session.clone());
    let shell = Arc::new(NavigationShell::new(api, session));

    // Panel operations run in the background and report through this channel.
    let (out_tx, mut out_rx) = mpsc::channel::<Vec<String>>(32);
    let printer = tokio::spawn(async move {
        while let Some(lines) = out_rx.recv().await {
            for line in lines {
                println!("{}", line);
            }
        }
    });

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(COMMANDS)));

    println!("{}", render::title("Super Agent Dashboard"));
    println!("{}", render::hint(&config.dashboard.base_url));
    println!();

    'session: loop {
        if !login(&mut rl, &gate).await {
            break;
        }
        println!("{}", messages::WELCOME);
        print_pages();

        loop {
            let prompt = format!("[{}] >> ", shell.current_page().await);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    match parse_command(trimmed) {
                        Ok(Command::Quit) => break 'session,
                        Ok(Command::Logout) => {
                            shell.logout().await;
                            println!("{}", render::hint("Sessione terminata."));
                            continue 'session;
                        }
                        Ok(Command::Help) => print_help(),
                        Ok(Command::Go(page)) => match shell.navigate(page).await {
                            Ok(panel) => {
                                for line in render_panel(&panel).await {
                                    println!("{}", line);
                                }
                            }
                            Err(err) => println!("{}", render::error(&err.to_string())),
                        },
                        Ok(command) => {
                            let panel = shell.active().await;
                            let out = out_tx.clone();
                            tokio::spawn(async move {
                                let lines = match execute(&panel, command).await {
                                    Ok(lines) => lines,
                                    Err(message) => vec![render::error(message)],
                                };
                                let _ = out.send(lines).await;
                            });
                        }
                        Err(message) => println!("{}", render::error(&message)),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", render::hint("CTRL-C: digita /quit per uscire."));
                }
                Err(ReadlineError::Eof) => break 'session,
                Err(err) => {
                    eprintln!("{}", render::error(&format!("Errore: {:?}", err)));
                    break 'session;
                }
            }
        }
    }

    drop(out_tx);
    let _ = printer.await;
    println!("{}", render::hint("Arrivederci!"));
    Ok(())
}

/// Prompts until login succeeds. `false` on CTRL-D.
async fn login(rl: &mut Editor<CliHelper, DefaultHistory>, gate: &AuthGate) -> bool {
    println!("{}", render::title("Login Super Agent"));
    loop {
        let Ok(username) = rl.readline("Username: ") else {
            return false;
        };
        let Ok(password) = rl.readline("Password: ") else {
            return false;
        };

        if gate.login(username.trim(), &password).await {
            return true;
        }
        if let Some(notice) = gate.view().await.notice {
            println!("{}", render::notice(&notice));
        }
    }
}

async fn execute(panel: &ActivePanel, command: Command) -> std::result::Result<Vec<String>, &'static str> {
    match (panel, command) {
        (_, Command::View) => {}
        (ActivePanel::Jobs(jobs), Command::Refresh) => jobs.refresh().await,
        (ActivePanel::Jobs(jobs), Command::CreateJob(form)) => jobs.create_job(&form).await,
        (ActivePanel::Jobs(jobs), Command::ShowJob(id)) => jobs.select_job(id).await,
        (ActivePanel::Project(project), Command::CreateProject(form)) => project.submit(&form).await,
        (ActivePanel::System(system), Command::Scan) => system.scan_apps().await,
        (ActivePanel::System(system), Command::Select(app)) => system.select_app(app).await,
        (ActivePanel::System(system), Command::Start) => system.start_app().await,
        (ActivePanel::System(system), Command::Ps | Command::Refresh) => {
            system.list_processes().await
        }
        (ActivePanel::System(system), Command::Kill(pid)) => system.kill_process(pid).await,
        (ActivePanel::System(system), Command::Authorize { app, allow }) => {
            system.authorize(&app, allow).await
        }
        (ActivePanel::System(system), Command::LogAction { action, result }) => {
            system.record_action(&action, &result).await;
            return Ok(vec![render::hint(&format!("Azione inviata: {}", action))]);
        }
        (ActivePanel::Chat(chat), Command::Text(text)) => chat.send(&text).await,
        (ActivePanel::Watchdog(watchdog), Command::Refresh) => watchdog.refresh().await,
        (ActivePanel::Watchdog(watchdog), Command::Toggle) => watchdog.toggle().await,
        (ActivePanel::Watchdog(watchdog), Command::Limit(limit)) => watchdog.set_limit(&limit).await,
        (ActivePanel::Watchdog(watchdog), Command::Movement { amount, desc }) => {
            watchdog.add_movement(&amount, &desc).await
        }
        (_, Command::Text(_)) => return Err(UNKNOWN_COMMAND),
        _ => return Err(NOT_ON_THIS_PAGE),
    }
    Ok(render_panel(panel).await)
}

async fn render_panel(panel: &ActivePanel) -> Vec<String> {
    match panel {
        ActivePanel::Home => vec![messages::WELCOME.to_string()],
        ActivePanel::Jobs(jobs) => render::jobs(&jobs.view().await),
        ActivePanel::Project(project) => render::project(&project.view().await),
        ActivePanel::System(system) => render::system(&system.view().await),
        ActivePanel::Chat(chat) => render::chat(&chat.view().await),
        ActivePanel::Watchdog(watchdog) => render::watchdog(&watchdog.view().await),
    }
}

fn print_pages() {
    for page in Page::ALL {
        println!("  {:<12} {}", page.as_str(), render::hint(page.label()));
    }
}

fn print_help() {
    for spec in COMMANDS {
        let synopsis = format!("{} {}", spec.name, spec.usage);
        println!("  {:<40} {}", synopsis, render::hint(spec.about));
    }
    println!("{}", render::hint("Pagine:"));
    print_pages();
}

#[cfg(test)]
mod tests {
    use super::*;
    use superagent_core::project::ProjectKind;

    #[test]
    fn test_parse_job_command() {
        assert_eq!(
            parse_command(r#"/job render {"frames": 3}"#).unwrap(),
            Command::CreateJob(JobForm {
                agent_id: "render".into(),
                config: r#"{"frames": 3}"#.into(),
            })
        );
        assert_eq!(parse_command("/job render").unwrap(), Command::CreateJob(JobForm {
            agent_id: "render".into(),
            config: "{}".into(),
        }));
    }

    #[test]
    fn test_parse_project_keeps_defaults() {
        let Command::CreateProject(form) = parse_command("/project Portale").unwrap() else {
            panic!("expected project command");
        };
        assert_eq!(form.nome, "Portale");
        assert_eq!(form.descrizione, ProjectForm::default().descrizione);

        let Command::CreateProject(form) =
            parse_command("/project Shop | Negozio online | app_mobile").unwrap()
        else {
            panic!("expected project command");
        };
        assert_eq!(form.tipo, ProjectKind::AppMobile);
        assert!(parse_command("/project a | b | desktop").is_err());
    }

    #[test]
    fn test_parse_authorize_and_kill() {
        assert_eq!(
            parse_command("/authorize Visual Studio blocca").unwrap(),
            Command::Authorize {
                app: "Visual Studio".into(),
                allow: false
            }
        );
        assert_eq!(parse_command("/kill 42").unwrap(), Command::Kill(42));
        assert_eq!(parse_command("/kill abc").unwrap_err(), "Uso: /kill <pid>");
    }

    #[test]
    fn test_plain_text_and_unknown() {
        assert_eq!(parse_command("ciao").unwrap(), Command::Text("ciao".into()));
        assert_eq!(parse_command("/dance").unwrap_err(), UNKNOWN_COMMAND);
        assert_eq!(parse_command("/go watchdog").unwrap(), Command::Go(Page::Watchdog));
    }
}
