//! CLI commands for OMNIS using clap.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

use crate::assistant::Assistant;
use crate::config::Settings;
use crate::diagnose;
use crate::rules::Resolver;
use crate::speech::{GoogleTts, ShellPlayback, SpeechQueue};

/// OMNIS - school assistant robot answer pipeline.
#[derive(Parser)]
#[command(name = "omnis")]
#[command(version = "0.1.0")]
#[command(about = "OMNIS - MGM school assistant robot", long_about = None)]
pub struct Commands {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ask a single question and print the answer
    Ask {
        /// The question to answer
        question: String,

        /// Also speak the answer through the speaker
        #[arg(long)]
        speak: bool,
    },

    /// Interactive question loop, speaking every answer
    Chat {
        /// Print answers without speaking them
        #[arg(long)]
        mute: bool,
    },

    /// Speak a phrase through the speaker
    Say {
        /// Text to speak
        text: String,
    },

    /// Print the local rule table
    Rules,

    /// Run hardware speaker diagnostics
    Diagnose,
}

impl Commands {
    pub async fn run(self) -> Result<()> {
        let settings = Settings::from_env();

        match self.command {
            Command::Ask { question, speak } => run_ask(&settings, &question, speak).await,
            Command::Chat { mute } => run_chat(&settings, mute).await,
            Command::Say { text } => run_say(&text).await,
            Command::Rules => run_rules(&settings),
            Command::Diagnose => {
                diagnose::run(&GoogleTts::new()).await?;
                Ok(())
            }
        }
    }
}

/// Wire the production speech stack: Google TTS through the shell players.
fn start_speech_queue() -> SpeechQueue {
    SpeechQueue::start(Arc::new(GoogleTts::new()), Arc::new(ShellPlayback::new()))
}

async fn run_ask(settings: &Settings, question: &str, speak: bool) -> Result<()> {
    let assistant = Assistant::new(settings);
    let answer = assistant.answer(question).await;
    println!("{}", answer);

    if speak {
        let queue = start_speech_queue();
        queue.enqueue(answer.as_str()).await;
        queue.drain().await;
        queue.stop();
    }

    Ok(())
}

async fn run_chat(settings: &Settings, mute: bool) -> Result<()> {
    let assistant = Assistant::new(settings);
    let queue = if mute { None } else { Some(start_speech_queue()) };

    println!("OMNIS ready. Ask a question, or 'exit' to leave.");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();

        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        let answer = assistant.answer(question).await;
        println!("{}", answer);

        if let Some(queue) = &queue {
            queue.enqueue(answer.as_str()).await;
        }
    }

    // Let the speaker finish before the process exits.
    if let Some(queue) = &queue {
        queue.drain().await;
        queue.stop();
    }

    println!("Goodbye!");
    Ok(())
}

async fn run_say(text: &str) -> Result<()> {
    let queue = start_speech_queue();
    queue.enqueue(text).await;
    queue.drain().await;
    queue.stop();
    Ok(())
}

fn run_rules(settings: &Settings) -> Result<()> {
    let resolver = Resolver::with_accuracy(settings.match_accuracy);

    for rule in resolver.rules() {
        println!("Q: {}", rule.pattern);
        println!("A: {}", rule.answer);
        println!();
    }

    Ok(())
}
