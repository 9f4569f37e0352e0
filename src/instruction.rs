use std::fmt;

use crate::ip::Direction;
use crate::state::ExecutionState;

/// One decoded grid cell.
///
/// Every cell decodes to something: catalogued operators map to their own
/// variant, ASCII digits push their value, and anything else pushes its
/// own code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Not,
    Greater,
    Go(Direction),
    GoRandom,
    BranchHorizontal,
    BranchVertical,
    StringMode,
    Dup,
    Swap,
    Discard,
    OutputInt,
    OutputChar,
    Bridge,
    Put,
    Get,
    Stop,
    Nop,
    Digit(u8),
    Literal(i64),
}

const QUOTE: i64 = '"' as i64;

impl Instruction {
    /// Decode a grid cell.
    pub fn decode(cell: i64) -> Self {
        let Some(c) = u32::try_from(cell).ok().and_then(char::from_u32) else {
            return Instruction::Literal(cell);
        };
        match c {
            '+' => Instruction::Add,
            '-' => Instruction::Sub,
            '*' => Instruction::Mul,
            '/' => Instruction::Div,
            '%' => Instruction::Mod,
            '!' => Instruction::Not,
            '`' => Instruction::Greater,
            '>' => Instruction::Go(Direction::East),
            '<' => Instruction::Go(Direction::West),
            '^' => Instruction::Go(Direction::North),
            'v' => Instruction::Go(Direction::South),
            '?' => Instruction::GoRandom,
            '_' => Instruction::BranchHorizontal,
            '|' => Instruction::BranchVertical,
            '"' => Instruction::StringMode,
            ':' => Instruction::Dup,
            '\\' => Instruction::Swap,
            '$' => Instruction::Discard,
            '.' => Instruction::OutputInt,
            ',' => Instruction::OutputChar,
            '#' => Instruction::Bridge,
            'p' => Instruction::Put,
            'g' => Instruction::Get,
            '@' => Instruction::Stop,
            ' ' => Instruction::Nop,
            '0'..='9' => Instruction::Digit(c as u8 - b'0'),
            _ => Instruction::Literal(cell),
        }
    }

    /// True if `c` is a catalogued operator rather than a literal push.
    pub fn is_operator(c: char) -> bool {
        !matches!(
            Self::decode(c as i64),
            Instruction::Literal(_) | Instruction::Digit(_)
        )
    }

    /// Apply this instruction to `state`. Returns the text it outputs, if any.
    ///
    /// Binary operators pop `a` then `b` and push `b op a`. The caller
    /// performs the regular post-instruction advance.
    pub fn execute(self, state: &mut ExecutionState) -> Option<String> {
        let stack = &mut state.stack;
        match self {
            Instruction::Add => {
                let (a, b) = (stack.pop(), stack.pop());
                stack.push(b.wrapping_add(a));
            }
            Instruction::Sub => {
                let (a, b) = (stack.pop(), stack.pop());
                stack.push(b.wrapping_sub(a));
            }
            Instruction::Mul => {
                let (a, b) = (stack.pop(), stack.pop());
                stack.push(b.wrapping_mul(a));
            }
            Instruction::Div => {
                let (a, b) = (stack.pop(), stack.pop());
                stack.push(if a == 0 { 0 } else { b.wrapping_div(a) });
            }
            Instruction::Mod => {
                let (a, b) = (stack.pop(), stack.pop());
                stack.push(if a == 0 { 0 } else { b.wrapping_rem(a) });
            }
            Instruction::Not => {
                let v = stack.pop();
                stack.push((v == 0) as i64);
            }
            Instruction::Greater => {
                let (a, b) = (stack.pop(), stack.pop());
                stack.push((b > a) as i64);
            }
            Instruction::Go(dir) => state.ip.dir = dir,
            Instruction::GoRandom => state.ip.dir = Direction::random(&mut state.rng),
            Instruction::BranchHorizontal => {
                state.ip.dir = if stack.pop() == 0 {
                    Direction::East
                } else {
                    Direction::West
                };
            }
            Instruction::BranchVertical => {
                state.ip.dir = if stack.pop() == 0 {
                    Direction::South
                } else {
                    Direction::North
                };
            }
            Instruction::StringMode => {
                // Terminates: at worst the pointer wraps back to the opening quote.
                state.advance();
                loop {
                    let cell = state.current();
                    if cell == QUOTE {
                        break;
                    }
                    state.stack.push(cell);
                    state.advance();
                }
            }
            Instruction::Dup => {
                let v = stack.pop();
                stack.push(v);
                stack.push(v);
            }
            Instruction::Swap => {
                let (a, b) = (stack.pop(), stack.pop());
                stack.push(a);
                stack.push(b);
            }
            Instruction::Discard => {
                stack.pop();
            }
            Instruction::OutputInt => return Some(stack.pop().to_string()),
            Instruction::OutputChar => {
                let v = stack.pop();
                let c = u32::try_from(v)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Some(c.to_string());
            }
            Instruction::Bridge => state.advance(),
            Instruction::Put => {
                let (y, x, v) = (stack.pop(), stack.pop(), stack.pop());
                state.grid.write(x, y, v);
            }
            Instruction::Get => {
                let (y, x) = (stack.pop(), stack.pop());
                let cell = state.grid.read(x, y);
                stack.push(cell);
            }
            Instruction::Stop => state.halted = true,
            Instruction::Nop => {}
            Instruction::Digit(d) => stack.push(d as i64),
            Instruction::Literal(v) => stack.push(v),
        }
        None
    }
}

/// Source symbol of the instruction.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Instruction::Add => '+',
            Instruction::Sub => '-',
            Instruction::Mul => '*',
            Instruction::Div => '/',
            Instruction::Mod => '%',
            Instruction::Not => '!',
            Instruction::Greater => '`',
            Instruction::Go(Direction::East) => '>',
            Instruction::Go(Direction::West) => '<',
            Instruction::Go(Direction::North) => '^',
            Instruction::Go(Direction::South) => 'v',
            Instruction::GoRandom => '?',
            Instruction::BranchHorizontal => '_',
            Instruction::BranchVertical => '|',
            Instruction::StringMode => '"',
            Instruction::Dup => ':',
            Instruction::Swap => '\\',
            Instruction::Discard => '$',
            Instruction::OutputInt => '.',
            Instruction::OutputChar => ',',
            Instruction::Bridge => '#',
            Instruction::Put => 'p',
            Instruction::Get => 'g',
            Instruction::Stop => '@',
            Instruction::Nop => ' ',
            Instruction::Digit(d) => char::from(b'0' + d),
            Instruction::Literal(v) => u32::try_from(*v)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        write!(f, "{c}")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_cell_decodes_and_executes(cell in any::<i64>(), stack in prop::collection::vec(any::<i64>(), 0..4)) {
            let mut state = ExecutionState::new("\" ", Some(0)).unwrap();
            for v in &stack {
                state.stack.push(*v);
            }
            let instr = Instruction::decode(cell);
            instr.execute(&mut state);
            prop_assert!((0..2).contains(&state.ip.x));
            prop_assert_eq!(state.ip.y, 0);
        }

        #[test]
        fn only_output_instructions_produce_text(c in any::<char>()) {
            let mut state = ExecutionState::new("\"", Some(0)).unwrap();
            state.stack.push(66);
            let instr = Instruction::decode(c as i64);
            let out = instr.execute(&mut state);
            let outputs = matches!(instr, Instruction::OutputInt | Instruction::OutputChar);
            prop_assert_eq!(out.is_some(), outputs);
        }
    }
}
