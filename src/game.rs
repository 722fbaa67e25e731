use anyhow::{Context, Result};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::config::ClearMode;
use crate::input::{self, InputError, QUIT};
use crate::puzzle::{Board, Direction};

pub const FAREWELL: &str = "\n\nBye\n\n";
pub const VICTORY: &str = "\n\nYou won!!!\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingInput,
    Moving(Direction),
    Won,
    Quit,
}

pub struct Game<R, W> {
    board: Board,
    input: R,
    output: W,
    clear: ClearMode,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(input: R, output: W, clear: ClearMode) -> Self {
        Self::with_board(Board::new(), input, output, clear)
    }

    pub fn with_board(board: Board, input: R, output: W, clear: ClearMode) -> Self {
        Self {
            board,
            input,
            output,
            clear,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Shuffles the board, then plays until the player wins or quits.
    pub fn run<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Result<Outcome> {
        self.board.randomize(rng);
        self.play()
    }

    /// Plays from the current board without shuffling it.
    pub fn play(&mut self) -> Result<Outcome> {
        self.render()?;

        let mut state = self.after_render();
        loop {
            state = match state {
                State::AwaitingInput => match input::read_command(&mut self.input) {
                    Ok(QUIT) => State::Quit,
                    Ok(c) => State::Moving(input::to_direction(c)),
                    Err(InputError::Exhausted) => {
                        warn!("console input closed, quitting");
                        State::Quit
                    }
                    Err(err) => return Err(err).context("reading command"),
                },
                State::Moving(direction) => {
                    if self.board.attempt_move(direction) {
                        self.render()?;
                        self.after_render()
                    } else {
                        debug!(%direction, "no tile to slide");
                        State::AwaitingInput
                    }
                }
                State::Won => {
                    info!("puzzle solved");
                    self.finish(VICTORY)?;
                    return Ok(Outcome::Won);
                }
                State::Quit => {
                    info!("player quit");
                    self.finish(FAREWELL)?;
                    return Ok(Outcome::Quit);
                }
            };
        }
    }

    fn after_render(&self) -> State {
        if self.board.is_solved() {
            State::Won
        } else {
            State::AwaitingInput
        }
    }

    fn render(&mut self) -> Result<()> {
        self.board
            .render(&mut self.output, &self.clear)
            .context("drawing board")?;
        self.output.flush().context("flushing console")
    }

    fn finish(&mut self, message: &str) -> Result<()> {
        self.output
            .write_all(message.as_bytes())
            .context("writing final message")?;
        self.output.flush().context("flushing console")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Cursor;

    fn rendered(board: &Board, clear: ClearMode) -> String {
        let mut out = Vec::new();
        board.render(&mut out, &clear).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn one_move_from_solved() -> Board {
        let mut board = Board::new();
        assert!(board.attempt_move(Direction::Right));
        board
    }

    #[test]
    fn quit_after_shuffle() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::new(Cursor::new("q\n"), Vec::new(), ClearMode::BlankLines(25));

        assert_eq!(game.run(&mut rng).unwrap(), Outcome::Quit);

        let board = *game.board();
        let output = String::from_utf8(game.output).unwrap();
        let expected = format!("{}{}", rendered(&board, ClearMode::BlankLines(25)), FAREWELL);
        assert_eq!(output, expected);
    }

    #[test]
    fn winning_move_renders_then_congratulates() {
        let start = one_move_from_solved();
        let clear = ClearMode::BlankLines(1);
        let mut game = Game::with_board(start, Cursor::new("a\n"), Vec::new(), clear);

        assert_eq!(game.play().unwrap(), Outcome::Won);
        assert!(game.board().is_solved());

        let output = String::from_utf8(game.output).unwrap();
        let expected = format!(
            "{}{}{}",
            rendered(&start, clear),
            rendered(&Board::SOLVED, clear),
            VICTORY
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn rejected_and_invalid_input_do_not_redraw() {
        let start = one_move_from_solved();
        let clear = ClearMode::BlankLines(0);
        let input = Cursor::new("x\nw\n\nw\nq\n");
        let mut game = Game::with_board(start, input, Vec::new(), clear);

        assert_eq!(game.play().unwrap(), Outcome::Quit);
        assert_eq!(*game.board(), start);

        let output = String::from_utf8(game.output).unwrap();
        assert_eq!(output, format!("{}{}", rendered(&start, clear), FAREWELL));
    }

    #[test]
    fn each_accepted_move_redraws() {
        let start = one_move_from_solved();
        let clear = ClearMode::BlankLines(0);
        let mut game = Game::with_board(start, Cursor::new("s\nw\nq\n"), Vec::new(), clear);

        assert_eq!(game.play().unwrap(), Outcome::Quit);

        let mut after_down = start;
        assert!(after_down.attempt_move(Direction::Down));
        let output = String::from_utf8(game.output).unwrap();
        let expected = format!(
            "{}{}{}{}",
            rendered(&start, clear),
            rendered(&after_down, clear),
            rendered(&start, clear),
            FAREWELL
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn exhausted_input_quits() {
        let mut game = Game::with_board(
            one_move_from_solved(),
            Cursor::new("x\n"),
            Vec::new(),
            ClearMode::BlankLines(0),
        );

        assert_eq!(game.play().unwrap(), Outcome::Quit);
        assert!(String::from_utf8(game.output).unwrap().ends_with(FAREWELL));
    }

    #[test]
    fn undecodable_input_is_ignored() {
        let start = one_move_from_solved();
        let clear = ClearMode::BlankLines(0);
        let input = Cursor::new(&b"\xe9\n\xff\xfe\nq\n"[..]);
        let mut game = Game::with_board(start, input, Vec::new(), clear);

        assert_eq!(game.play().unwrap(), Outcome::Quit);
        assert_eq!(*game.board(), start);
        let output = String::from_utf8(game.output).unwrap();
        assert_eq!(output, format!("{}{}", rendered(&start, clear), FAREWELL));
    }

    #[test]
    fn solved_board_wins_without_reading_input() {
        let mut game = Game::new(Cursor::new(""), Vec::new(), ClearMode::BlankLines(0));

        assert_eq!(game.play().unwrap(), Outcome::Won);
        assert!(String::from_utf8(game.output).unwrap().ends_with(VICTORY));
    }
}
