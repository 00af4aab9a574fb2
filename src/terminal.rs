// ========================================
// ネイティブ用の対話ランナー
// ========================================

use crate::cart::CardId;
use crate::engine::controller::CartController;
use crate::engine::prompt::Prompter;
use crate::ui::event::{CartEvent, EffectTarget};
use crate::ui::view::SnapshotView;
use colored::*;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(CartEvent),
    Wait(Duration),
    Show,
    Json,
    Html,
    Help,
    Quit,
}

/// 1行分のコマンドを解釈する。空行は `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let card = |arg: Option<&str>| -> Result<CardId, String> {
        let raw = arg.ok_or_else(|| format!("'{}' needs a card number", head))?;
        raw.parse::<u32>()
            .map(CardId)
            .map_err(|_| format!("Invalid card number: {}", raw))
    };

    let command = match head {
        "+" | "inc" => Command::Event(CartEvent::Increase { card: card(arg)? }),
        "-" | "dec" => Command::Event(CartEvent::Decrease { card: card(arg)? }),
        "rm" | "remove" => Command::Event(CartEvent::Remove { card: card(arg)? }),
        "like" => Command::Event(CartEvent::ToggleLike { card: card(arg)? }),
        "img" => Command::Event(CartEvent::ImageClicked { card: card(arg)? }),
        "wait" => {
            let raw = arg.ok_or_else(|| "'wait' needs a duration in ms".to_string())?;
            let ms = raw
                .parse::<u64>()
                .map_err(|_| format!("Invalid duration: {}", raw))?;
            Command::Wait(Duration::from_millis(ms))
        }
        "show" | "ls" => Command::Show,
        "json" => Command::Json,
        "html" => Command::Html,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(Some(command))
}

pub const COMMAND_HELP: &str = "COMMANDS:
    + N / - N       Increase / decrease the quantity of card N
    rm N            Remove card N
    like N          Toggle the liked state of card N
    img N           Click the image of card N
    wait MS         Let MS milliseconds pass (visual effects expire)
    show            Print the cart
    json            Print the cart as JSON
    html            Print the current page markup
    help            Show this help
    quit            Exit";

/// 標準入力で確認を求めるプロンプト
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{} {} ", message.yellow().bold(), "[y/N]".dimmed());
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "o" | "oui")
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message.cyan().bold());
    }
}

/// 現在のカートを出力
pub fn print_cart<P: Prompter, W: Write>(
    controller: &CartController<SnapshotView, P>,
    out: &mut W,
) -> io::Result<()> {
    let view = controller.view();
    if view.rows().is_empty() {
        writeln!(out, "  {}", "(empty cart)".dimmed())?;
    }
    for row in view.rows() {
        let heart = if row.liked { "♥".red().to_string() } else { "♡".to_string() };
        let pulse = if view.has_class(EffectTarget::Image(row.id), &controller.config().image_click_class) {
            " *".magenta().to_string()
        } else {
            String::new()
        };
        writeln!(
            out,
            "  [{}] {:<16} {:>10} x {:<4} {}{}",
            row.id, row.name, row.price_text, row.quantity_text, heart, pulse
        )?;
    }

    let total = if view.has_class(EffectTarget::Total, &controller.config().highlight_class) {
        view.total_text().yellow().bold().to_string()
    } else {
        view.total_text().bold().to_string()
    };
    writeln!(out, "  Total: {}", total)
}

/// 入力が尽きるか `quit` までコマンドを処理する
///
/// `read_line` は1行読んでバイト数を返す（0で終了）。確認プロンプトも標準入力を読むので、
/// 標準入力のロックは行ごとに取り直す必要がある。
pub fn run_session<P, L, W>(
    controller: &mut CartController<SnapshotView, P>,
    mut read_line: L,
    out: &mut W,
) -> io::Result<()>
where
    P: Prompter,
    L: FnMut(&mut String) -> io::Result<usize>,
    W: Write,
{
    print_cart(controller, out)?;

    loop {
        write!(out, "{} ", ">".green().bold())?;
        out.flush()?;

        let mut line = String::new();
        if read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e.red())?;
                continue;
            }
        };

        match command {
            Command::Event(event) => {
                if controller.dispatch(&event) {
                    print_cart(controller, out)?;
                } else if controller.cart().get(event.card()).is_none() {
                    writeln!(out, "{}", format!("No card {}", event.card()).red())?;
                }
            }
            Command::Wait(elapsed) => {
                controller.view_mut().advance(elapsed);
                print_cart(controller, out)?;
            }
            Command::Show => print_cart(controller, out)?,
            Command::Json => {
                let json = serde_json::to_string_pretty(controller.cart())
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                writeln!(out, "{}", json)?;
            }
            Command::Html => writeln!(out, "{}", controller.view().render_html())?,
            Command::Help => writeln!(out, "{}", COMMAND_HELP)?,
            Command::Quit => return Ok(()),
        }
    }
}
