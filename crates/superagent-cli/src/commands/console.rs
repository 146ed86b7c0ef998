//! Interactive REPL for the analysis console.

use std::sync::Arc;

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use superagent_application::ConsoleShell;
use superagent_application::console_shell::ConsoleView;
use superagent_core::config::ClientConfig;
use superagent_core::console::AnalyzeMode;
use superagent_interaction::ConsoleClient;
use tokio::sync::mpsc;

use crate::helper::{CliHelper, CommandSpec};
use crate::render;

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "/file", usage: "<percorso>", about: "seleziona il file" },
    CommandSpec { name: "/mode", usage: "<analizza|security>", about: "modalita di analisi" },
    CommandSpec { name: "/analyze", usage: "", about: "analizza il file selezionato" },
    CommandSpec { name: "/report", usage: "", about: "genera il report" },
    CommandSpec { name: "/llm", usage: "<istruzione>", about: "LLM assist sul file" },
    CommandSpec { name: "/status", usage: "", about: "verifica lo stato del backend" },
    CommandSpec { name: "/chat", usage: "", about: "mostra la chat" },
    CommandSpec { name: "/help", usage: "", about: "questo elenco" },
    CommandSpec { name: "/quit", usage: "", about: "esce" },
];

/// Prints the console pane incrementally from view snapshots.
#[derive(Default)]
struct PaneCursor {
    printed: usize,
}

impl PaneCursor {
    fn fresh_lines(&mut self, view: &ConsoleView) -> Vec<String> {
        let lines = view
            .lines
            .iter()
            .skip(self.printed)
            .map(render::console_line)
            .collect::<Vec<_>>();
        self.printed = self.printed.max(view.lines.len());
        lines
    }
}

pub async fn run(config: &ClientConfig, file: Option<String>) -> Result<()> {
    let shell = Arc::new(ConsoleShell::new(Arc::new(ConsoleClient::new(
        &config.console,
    )?)));
    if let Some(file) = file {
        shell.set_file_path(file).await;
    }

    let (view_tx, mut view_rx) = mpsc::channel::<ConsoleView>(32);
    let printer = tokio::spawn(async move {
        let mut cursor = PaneCursor::default();
        while let Some(view) = view_rx.recv().await {
            for line in cursor.fresh_lines(&view) {
                println!("{}", line);
            }
        }
    });

    println!("{}", render::title("Super Agent Console"));
    println!("{}", render::hint(&config.console.base_url));
    shell.initialize().await;
    let _ = view_tx.send(shell.view().await).await;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(COMMANDS)));

    loop {
        let view = shell.view().await;
        let prompt = format!(
            "[{}] {} ({}) >> ",
            view.status.label(),
            if view.file_path.is_empty() { "-" } else { view.file_path.as_str() },
            view.mode
        );
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let (name, rest) = match trimmed.split_once(char::is_whitespace) {
                    Some((name, rest)) => (name, rest.trim().to_string()),
                    None => (trimmed, String::new()),
                };
                match name {
                    "/quit" | "/exit" => break,
                    "/help" => {
                        for spec in COMMANDS {
                            let synopsis = format!("{} {}", spec.name, spec.usage);
                            println!("  {:<28} {}", synopsis, render::hint(spec.about));
                        }
                    }
                    "/chat" => {
                        for message in shell.view().await.transcript.messages() {
                            println!("{}", render::chat_message(message));
                        }
                    }
                    "/file" => shell.set_file_path(rest).await,
                    "/mode" => match rest.parse::<AnalyzeMode>() {
                        Ok(mode) => shell.set_mode(mode).await,
                        Err(err) => println!("{}", render::error(&err.to_string())),
                    },
                    "/analyze" | "/report" | "/status" | "/llm" => {
                        let command = name.to_string();
                        spawn_action(&shell, &view_tx, move |shell| async move {
                            match command.as_str() {
                                "/analyze" => shell.analyze().await,
                                "/report" => shell.report().await,
                                "/status" => shell.check_status().await,
                                _ => shell.llm_assist(&rest).await,
                            }
                        });
                    }
                    _ if name.starts_with('/') => {
                        println!("{}", render::error("Comando sconosciuto, digita /help"));
                    }
                    _ => {
                        let text = trimmed.to_string();
                        spawn_action(&shell, &view_tx, move |shell| async move {
                            shell.send_chat(&text).await
                        });
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", render::hint("CTRL-C: digita /quit per uscire."));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", render::error(&format!("Errore: {:?}", err)));
                break;
            }
        }
    }

    drop(view_tx);
    let _ = printer.await;
    Ok(())
}

/// Runs `action` in the background and hands the resulting view to the printer.
fn spawn_action<F, Fut>(shell: &Arc<ConsoleShell>, views: &mpsc::Sender<ConsoleView>, action: F)
where
    F: FnOnce(Arc<ConsoleShell>) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let shell = shell.clone();
    let views = views.clone();
    tokio::spawn(async move {
        action(shell.clone()).await;
        let _ = views.send(shell.view().await).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use superagent_application::console_shell::{ConsoleLine, LineKind};

    fn view_with(count: usize) -> ConsoleView {
        ConsoleView {
            lines: (0..count)
                .map(|i| ConsoleLine {
                    kind: LineKind::System,
                    text: format!("riga {}", i),
                })
                .collect(),
            ..ConsoleView::default()
        }
    }

    #[test]
    fn test_cursor_prints_each_line_once() {
        colored::control::set_override(false);
        let mut cursor = PaneCursor::default();

        assert_eq!(cursor.fresh_lines(&view_with(2)), vec!["riga 0", "riga 1"]);
        assert_eq!(cursor.fresh_lines(&view_with(3)), vec!["riga 2"]);
        // An older snapshot arriving late prints nothing.
        assert!(cursor.fresh_lines(&view_with(1)).is_empty());
        assert!(cursor.fresh_lines(&view_with(3)).is_empty());
    }
}
