/// Which of the three page regions is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading {
        ticket: u64,
    },
    Error(String),
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub loading: bool,
    pub error: bool,
    pub results: bool,
}

impl Phase {
    pub fn visibility(&self) -> Visibility {
        match self {
            Phase::Idle => Visibility::default(),
            Phase::Loading { .. } => Visibility {
                loading: true,
                ..Visibility::default()
            },
            Phase::Error(_) => Visibility {
                error: true,
                ..Visibility::default()
            },
            Phase::Results => Visibility {
                results: true,
                ..Visibility::default()
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading { .. })
    }

    pub fn loading_ticket(&self) -> Option<u64> {
        match self {
            Phase::Loading { ticket } => Some(*ticket),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }
}
