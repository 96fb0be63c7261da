//! WhatsApp simulator: same handler as the webhook, fed from stdin.

use anyhow::Result;
use caixa_finance::{Classifier, summarize};
use caixa_whatsapp::{MessageHandler, Outcome};
use chrono::Local;
use std::io::{self, BufRead, Write};

use crate::finance_cmd::render_summary;

const QUIT_WORDS: [&str; 3] = ["sair", "exit", "quit"];

pub fn run(classifier: &Classifier) -> Result<()> {
    let handler = MessageHandler::new(classifier);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Vec::new();

    println!("Simulador WhatsApp: digite uma mensagem (\"ajuda\" para exemplos, \"sair\" para terminar)\n");

    loop {
        print!("você> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if QUIT_WORDS.contains(&line.to_lowercase().as_str()) {
            break;
        }

        let outcome = handler.handle_text(line, Local::now().date_naive());
        if let Outcome::Recorded { record, .. } = &outcome {
            session.push(record.clone());
        }
        match outcome.reply() {
            Some(reply) => println!("bot> {}\n", reply.replace('\n', "\n     ")),
            None => println!("bot> (sem resposta)\n"),
        }
    }

    if !session.is_empty() {
        println!();
        print!("{}", render_summary(&summarize(&session)));
    }
    Ok(())
}
