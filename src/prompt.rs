use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::scoring::{OptionGroupController, QuizConfig, QuizEvent};

/// Prompt with a message and return the trimmed input line.
/// End of input is an error so callers never loop forever on a closed stdin.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Input closed before an answer was given");
    }
    Ok(line.trim().to_string())
}

/// Yes/no question. Empty input picks the default.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, output, &format!("{} [{}]: ", message, hint))?.to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

/// Ask for a 1-based choice out of `count`, re-asking until valid.
/// Returns the 0-based index.
pub fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    count: usize,
) -> Result<usize> {
    loop {
        let answer = prompt(input, output, &format!("{} [1-{}]: ", message, count))?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
            _ => writeln!(output, "  Invalid: enter a number from 1 to {}. Try again.", count)
                .context("Failed to write prompt")?,
        }
    }
}

/// Walk through every question, feeding each answer to the controller.
pub fn ask_quiz<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    quiz: &QuizConfig,
    controller: &mut OptionGroupController,
) -> Result<()> {
    for (g, group) in quiz.groups.iter().enumerate() {
        writeln!(output).context("Failed to write prompt")?;
        writeln!(output, "{}. {}", g + 1, group.prompt).context("Failed to write prompt")?;
        for (o, option) in group.options.iter().enumerate() {
            writeln!(output, "   {}) {}", o + 1, option.label).context("Failed to write prompt")?;
        }

        let choice = prompt_choice(input, output, "  Your answer", group.options.len())?;
        if let Some(option) = quiz.option_ref(g, choice) {
            controller.dispatch(QuizEvent::Select(option));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_trims() {
        let mut input = Cursor::new("  hello \n");
        let mut output = Vec::new();
        let answer = prompt(&mut input, &mut output, "> ").unwrap();
        assert_eq!(answer, "hello");
        assert_eq!(String::from_utf8(output).unwrap(), "> ");
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(prompt(&mut input, &mut output, "> ").is_err());
    }

    #[test]
    fn test_yes_no_default() {
        let mut input = Cursor::new("\nn\nYES\n");
        let mut output = Vec::new();
        assert!(prompt_yes_no(&mut input, &mut output, "ok?", true).unwrap());
        assert!(!prompt_yes_no(&mut input, &mut output, "ok?", true).unwrap());
        assert!(prompt_yes_no(&mut input, &mut output, "ok?", false).unwrap());
    }

    #[test]
    fn test_choice_retries_until_valid() {
        let mut input = Cursor::new("0\nabc\n4\n2\n");
        let mut output = Vec::new();
        let choice = prompt_choice(&mut input, &mut output, "pick", 3).unwrap();
        assert_eq!(choice, 1);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid").count(), 3);
    }

    #[test]
    fn test_ask_quiz_fills_every_group() {
        let quiz = QuizConfig::default();
        let mut controller = OptionGroupController::new(&quiz);
        let mut input = Cursor::new("3\n2\n1\n");
        let mut output = Vec::new();

        ask_quiz(&mut input, &mut output, &quiz, &mut controller).unwrap();

        let selections = controller.selections();
        assert_eq!(selections.len(), 3);
        assert_eq!(selections.selected(0), quiz.option_ref(0, 2));
        assert_eq!(selections.selected(1), quiz.option_ref(1, 1));
        assert_eq!(selections.selected(2), quiz.option_ref(2, 0));
        assert!(String::from_utf8(output).unwrap().contains("Drive alone"));
    }
}
