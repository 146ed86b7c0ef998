//! Turns panel snapshots into colored terminal lines.

use colored::Colorize;
use superagent_application::console_shell::{ConsoleLine, LineKind, StatusIndicator};
use superagent_application::panels::chat::ChatView;
use superagent_application::panels::jobs::JobsView;
use superagent_application::panels::project::ProjectView;
use superagent_application::panels::system::SystemView;
use superagent_application::panels::watchdog::WatchdogView;
use superagent_application::{Notice, NoticeLevel};
use superagent_core::chat::{ChatMessage, ChatRole};

pub fn title(text: &str) -> String {
    format!("=== {} ===", text).bright_magenta().bold().to_string()
}

pub fn hint(text: &str) -> String {
    text.bright_black().to_string()
}

pub fn error(text: &str) -> String {
    text.red().to_string()
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Error => notice.text.red().to_string(),
        NoticeLevel::Success => notice.text.green().to_string(),
    }
}

fn push_notice(lines: &mut Vec<String>, current: &Option<Notice>) {
    if let Some(current) = current {
        lines.push(notice(current));
    }
}

pub fn jobs(view: &JobsView) -> Vec<String> {
    let mut lines = vec![title("Job Distribuiti")];
    push_notice(&mut lines, &view.notice);

    for job in &view.jobs {
        let marker = if view.selected.as_ref() == Some(&job.id) { "*" } else { " " };
        lines.push(format!(
            "{} Job {} - Agente {} - {} - {}%",
            marker, job.id, job.agent_id, job.status, job.progress
        ));
    }

    if let Some(detail) = &view.detail {
        lines.push("Dettagli Job".bold().to_string());
        lines.push(format!("  ID: {}", detail.id));
        lines.push(format!("  Agente: {}", detail.agent_id));
        lines.push(format!("  Status: {}", detail.status));
        lines.push(format!("  Progresso: {}%", detail.progress));
        lines.push("  Log:".to_string());
        lines.extend(detail.log.iter().map(|entry| format!("    - {}", entry)));
    }
    lines
}

pub fn project(view: &ProjectView) -> Vec<String> {
    let mut lines = vec![title("Progetto Grafico/Web")];
    push_notice(&mut lines, &view.notice);

    if let Some(project) = &view.result {
        lines.push("Progetto Creato".bold().to_string());
        lines.push(format!("  Nome: {}", project.nome));
        lines.push(format!("  Descrizione: {}", project.descrizione));
        lines.push(format!("  Tipo: {}", project.tipo.label()));
        lines.push("  Team:".to_string());
        lines.extend(project.team.iter().map(|member| format!("    - {}", member)));
        lines.push("  Log:".to_string());
        lines.extend(project.log.iter().map(|entry| format!("    - {}", entry)));
        lines.push(format!("  Stato: {}", project.stato));
    }
    lines
}

pub fn system(view: &SystemView) -> Vec<String> {
    let mut lines = vec![title("Gestione Applicazioni e Processi")];
    push_notice(&mut lines, &view.notice);

    if !view.apps.is_empty() {
        let header = match &view.system {
            Some(system) => format!("Applicazioni ({})", system),
            None => "Applicazioni".to_string(),
        };
        lines.push(header.bold().to_string());
        for app in &view.apps {
            if view.selected_app.as_deref() == Some(app.as_str()) {
                lines.push(format!("* {}", app).cyan().to_string());
            } else {
                lines.push(format!("  {}", app));
            }
        }
    }
    if !view.processes.is_empty() {
        lines.push("Processi Attivi".bold().to_string());
        lines.extend(
            view.processes
                .iter()
                .map(|process| format!("  {} (PID: {})", process.display_name(), process.pid)),
        );
    }
    if !view.log.is_empty() {
        lines.push("Log Azioni".bold().to_string());
        lines.extend(view.log.iter().map(|entry| format!("  {}", entry.yellow())));
    }
    lines
}

pub fn chat_message(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => format!("{} {}", "Tu:".green().bold(), message.content),
        ChatRole::Agent => format!(
            "{} {}",
            "Super Agent:".bright_magenta().bold(),
            message.content.bright_blue()
        ),
    }
}

pub fn chat(view: &ChatView) -> Vec<String> {
    let mut lines: Vec<String> = view
        .transcript
        .messages()
        .iter()
        .map(chat_message)
        .collect();
    if view.pending > 0 {
        lines.push(hint(&format!("({} in attesa di risposta)", view.pending)));
    }
    push_notice(&mut lines, &view.notice);
    lines
}

pub fn watchdog(view: &WatchdogView) -> Vec<String> {
    let status = &view.status;
    let mut lines = vec![
        title("Watchdog Spesa"),
        format!(
            "Stato: {} | Soglia: {} | Blocco: {}",
            if status.active { "Attivo".green() } else { "Disattivo".yellow() },
            status.limit,
            if status.blocked { "ATTIVO".red().bold() } else { "Nessun blocco".normal() },
        ),
    ];
    push_notice(&mut lines, &view.notice);

    if !view.notifications.is_empty() {
        lines.push("Notifiche".bold().to_string());
        lines.extend(view.notifications.iter().map(|n| {
            format!("  {}: {} {}", n.kind.bold(), n.msg, n.date.italic())
        }));
    }
    lines
}

pub fn status_indicator(status: &StatusIndicator) -> String {
    match status {
        StatusIndicator::Online(_) => status.label().on_green().black().to_string(),
        StatusIndicator::Offline => status.label().on_red().white().to_string(),
        StatusIndicator::Unknown => status.label().bright_black().to_string(),
    }
}

pub fn console_line(line: &ConsoleLine) -> String {
    match line.kind {
        LineKind::System => line.text.bright_black().to_string(),
        LineKind::User => line.text.green().to_string(),
        LineKind::Agent => line.text.bright_blue().to_string(),
    }
}
