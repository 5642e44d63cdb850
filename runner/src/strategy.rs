use twenty48::Command;

/// How the runner picks the next command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// The built-in heuristic: most empty cells, then highest score.
    Auto,
    /// A uniformly random direction.
    Random,
}

impl Strategy {
    pub fn command(self) -> Command {
        match self {
            Strategy::Auto => Command::AutoMove,
            Strategy::Random => Command::RandomMove,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Auto => write!(f, "auto"),
            Strategy::Random => write!(f, "random"),
        }
    }
}
