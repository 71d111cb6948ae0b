//! Interactive decision collection over a line-oriented console.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use thiserror::Error;

use shopsim_engine::{DayView, Decision, DecisionSource};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input closed before the day's decision was complete")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One input stream shared between the prompt and the day report's pause.
#[derive(Debug)]
pub struct SharedInput<R>(Rc<RefCell<R>>);

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<R: BufRead> SharedInput<R> {
    pub fn new(input: R) -> Self {
        Self(Rc::new(RefCell::new(input)))
    }

    /// Read one line without its terminator; `Closed` at end of input.
    pub fn next_line(&self) -> Result<String, InputError> {
        let mut line = String::new();
        if self.0.borrow_mut().read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Prompts the operator for each field of a [`Decision`].
///
/// Unparseable answers are asked again; end of input aborts the run.
pub struct ConsoleDecisions<R, W> {
    input: SharedInput<R>,
    out: W,
}

impl<R: BufRead, W: Write> ConsoleDecisions<R, W> {
    pub fn new(input: SharedInput<R>, out: W) -> Self {
        Self { input, out }
    }

    fn ask_number(&mut self, prompt: &str) -> Result<f64, InputError> {
        loop {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
            match self.input.next_line()?.trim().parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.out, "Please enter a number.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> DecisionSource for ConsoleDecisions<R, W> {
    type Error = InputError;

    fn decide(&mut self, view: &DayView<'_>) -> Result<Decision, Self::Error> {
        let state = view.state;
        writeln!(self.out)?;
        writeln!(self.out, "Decisions for day {}:", view.day())?;

        let transfer_vol = self.ask_number(&format!(
            "  Units to move to the shop (0-{:.0}): ",
            state.stores.basic
        ))?;
        let transfer_vol = state.stores.clamp_transfer(transfer_vol);

        let accept_offer = self.ask_number(&format!(
            "  Buy {:.0} units at {:.2}? (1 = yes, 0 = no): ",
            state.offer.volume, state.offer.unit_price
        ))? == 1.0;

        let headroom = state.credit.headroom();
        let credit_request = if headroom > 0.0 {
            let amount =
                self.ask_number(&format!("  Credit to draw (0 = none, up to {headroom:.2}): "))?;
            (amount != 0.0).then_some(amount)
        } else {
            None
        };

        let ret_price = self.ask_number("  Sale price per unit (10-50): ")?;

        Ok(Decision {
            transfer_vol,
            accept_offer,
            credit_request,
            ret_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use shopsim_accounting::CREDIT_LIMIT;
    use shopsim_engine::ShopState;

    fn console(script: &str) -> ConsoleDecisions<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleDecisions::new(
            SharedInput::new(Cursor::new(script.as_bytes().to_vec())),
            Vec::new(),
        )
    }

    #[test]
    fn reads_fields_in_order() {
        let state = ShopState::opening();
        let mut c = console("30\n1\n500\n22.5\n");
        let d = c.decide(&DayView::new(&state)).unwrap();
        assert_eq!(
            d,
            Decision {
                transfer_vol: 30.0,
                accept_offer: true,
                credit_request: Some(500.0),
                ret_price: 22.5,
            }
        );
        let shown = String::from_utf8(c.out).unwrap();
        assert!(shown.contains("Decisions for day 1:"));
        assert!(shown.contains("up to 50000.00"));
    }

    #[test]
    fn asks_again_on_garbage_and_clamps_transfer() {
        let state = ShopState::opening();
        let mut c = console("lots\n9999\n0\n0\n15\n");
        let d = c.decide(&DayView::new(&state)).unwrap();
        assert_eq!(d.transfer_vol, state.stores.basic);
        assert!(!d.accept_offer);
        assert_eq!(d.credit_request, None);
        assert!(String::from_utf8(c.out).unwrap().contains("Please enter a number."));
    }

    #[test]
    fn skips_credit_prompt_when_line_is_exhausted() {
        let mut state = ShopState::opening();
        state.credit.taken = CREDIT_LIMIT;
        let mut c = console("0\n0\n40\n");
        let d = c.decide(&DayView::new(&state)).unwrap();
        assert_eq!(d.credit_request, None);
        assert_eq!(d.ret_price, 40.0);
        assert!(!String::from_utf8(c.out).unwrap().contains("Credit to draw"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let state = ShopState::opening();
        let mut c = console("10\n1\n");
        assert!(matches!(
            c.decide(&DayView::new(&state)),
            Err(InputError::Closed)
        ));
    }
}
