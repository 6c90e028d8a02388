//! Command-line argument parsing for the perft driver.

use arbiter_core::STARTING_FEN;

/// Errors in the command line.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    /// A flag that takes a value was last on the line.
    #[error("missing value for {flag}")]
    MissingValue {
        /// The flag without its value.
        flag: String,
    },

    /// A numeric flag got something that is not a number.
    #[error("invalid value for {flag}: {value}")]
    InvalidValue {
        /// The flag being parsed.
        flag: String,
        /// The offending value.
        value: String,
    },

    /// The argument is not a known flag.
    #[error("unknown argument: {arg}")]
    UnknownArgument {
        /// The unrecognized argument.
        arg: String,
    },
}

/// Options for one perft run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerftArgs {
    /// Position to start from.
    pub fen: String,
    /// Moves played from `fen` before counting, in coordinate notation.
    pub moves: Vec<String>,
    /// Plies to search.
    pub depth: usize,
    /// Print the node count below each root move.
    pub divide: bool,
    /// Worker threads for the root split.
    pub threads: usize,
    /// Compute check and mate statistics.
    pub annotations: bool,
    /// Print the position before counting.
    pub show: bool,
    /// Print usage and exit.
    pub help: bool,
}

impl Default for PerftArgs {
    fn default() -> Self {
        Self {
            fen: STARTING_FEN.to_string(),
            moves: Vec::new(),
            depth: 1,
            divide: false,
            threads: 1,
            annotations: true,
            show: false,
            help: false,
        }
    }
}

pub const USAGE: &str = "\
usage: arbiter [--fen <FEN>] [--moves <MOVE>...] [--depth <N>] [--threads <N>]
               [--divide] [--no-annotations] [--show]";

/// Parse the arguments after the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<PerftArgs, CliError> {
    let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let mut parsed = PerftArgs::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "--fen" => {
                // A FEN spans up to six whitespace-separated fields.
                let fields = values(&tokens[i + 1..], 6);
                if fields.is_empty() {
                    return Err(missing("--fen"));
                }
                parsed.fen = fields.join(" ");
                i += 1 + fields.len();
            }
            "--moves" => {
                let moves = values(&tokens[i + 1..], usize::MAX);
                parsed.moves = moves.iter().map(|mv| mv.to_string()).collect();
                i += 1 + moves.len();
            }
            "--depth" | "-d" => {
                parsed.depth = parse_number(tokens.get(i + 1), tokens[i])?;
                i += 2;
            }
            "--threads" | "-t" => {
                parsed.threads = parse_number(tokens.get(i + 1), tokens[i])?;
                i += 2;
            }
            "--divide" => {
                parsed.divide = true;
                i += 1;
            }
            "--no-annotations" => {
                parsed.annotations = false;
                i += 1;
            }
            "--show" => {
                parsed.show = true;
                i += 1;
            }
            "--help" | "-h" => {
                parsed.help = true;
                i += 1;
            }
            other => {
                return Err(CliError::UnknownArgument {
                    arg: other.to_string(),
                });
            }
        }
    }

    Ok(parsed)
}

/// Leading tokens up to the next flag, at most `limit` of them.
fn values<'a>(tokens: &[&'a str], limit: usize) -> Vec<&'a str> {
    tokens
        .iter()
        .take_while(|token| !token.starts_with('-') || token.len() == 1)
        .take(limit)
        .copied()
        .collect()
}

fn missing(flag: &str) -> CliError {
    CliError::MissingValue {
        flag: flag.to_string(),
    }
}

fn parse_number(token: Option<&&str>, flag: &str) -> Result<usize, CliError> {
    let value = token.ok_or_else(|| missing(flag))?;
    value.parse().map_err(|_| CliError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = parse_args::<&str>(&[]).unwrap();
        assert_eq!(args, PerftArgs::default());
        assert_eq!(args.fen, STARTING_FEN);
        assert_eq!(args.depth, 1);
        assert_eq!(args.threads, 1);
        assert!(args.annotations);
    }

    #[test]
    fn fen_takes_all_its_fields() {
        let args = parse_args(&[
            "--fen", "8/8/8/8/8/8/8/K6k", "b", "-", "-", "3", "40", "--depth", "2",
        ])
        .unwrap();
        assert_eq!(args.fen, "8/8/8/8/8/8/8/K6k b - - 3 40");
        assert_eq!(args.depth, 2);
    }

    #[test]
    fn short_fen_stops_at_the_next_flag() {
        let args = parse_args(&["--fen", "8/8/8/8/8/8/8/K6k", "w", "--show"]).unwrap();
        assert_eq!(args.fen, "8/8/8/8/8/8/8/K6k w");
        assert!(args.show);
    }

    #[test]
    fn flags_and_moves() {
        let args = parse_args(&[
            "--moves", "e2e4", "e7e5", "--divide", "-d", "3", "-t", "4", "--no-annotations",
        ])
        .unwrap();
        assert_eq!(args.moves, ["e2e4", "e7e5"]);
        assert!(args.divide);
        assert_eq!(args.depth, 3);
        assert_eq!(args.threads, 4);
        assert!(!args.annotations);
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_args(&["--depth"]),
            Err(CliError::MissingValue {
                flag: "--depth".to_string()
            })
        );
        assert_eq!(
            parse_args(&["--threads", "many"]),
            Err(CliError::InvalidValue {
                flag: "--threads".to_string(),
                value: "many".to_string()
            })
        );
        assert_eq!(
            parse_args(&["--fen"]),
            Err(CliError::MissingValue {
                flag: "--fen".to_string()
            })
        );
        assert_eq!(
            parse_args(&["perft"]),
            Err(CliError::UnknownArgument {
                arg: "perft".to_string()
            })
        );
    }
}
