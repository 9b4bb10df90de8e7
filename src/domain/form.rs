/// The two entry forms the ledger front end can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open,
}

/// Visibility of the income and expense forms.
///
/// Each form opens on request and closes on cancel or after a successful
/// submission. Only one form may be open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forms {
    income: FormState,
    expense: FormState,
}

impl Forms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, kind: FormKind) -> FormState {
        match kind {
            FormKind::Income => self.income,
            FormKind::Expense => self.expense,
        }
    }

    pub fn is_open(&self, kind: FormKind) -> bool {
        self.state(kind) == FormState::Open
    }

    /// Open a form. Returns false (and changes nothing) if the other form is open.
    pub fn open(&mut self, kind: FormKind) -> bool {
        if self.is_open(kind.other()) {
            return false;
        }
        *self.slot(kind) = FormState::Open;
        true
    }

    pub fn cancel(&mut self, kind: FormKind) {
        *self.slot(kind) = FormState::Closed;
    }

    /// Close the form once its submission went through. A failed submission
    /// keeps it open so the user can correct the input.
    pub fn submitted<T, E>(&mut self, kind: FormKind, outcome: &Result<T, E>) {
        if outcome.is_ok() {
            *self.slot(kind) = FormState::Closed;
        }
    }

    fn slot(&mut self, kind: FormKind) -> &mut FormState {
        match kind {
            FormKind::Income => &mut self.income,
            FormKind::Expense => &mut self.expense,
        }
    }
}

impl FormKind {
    fn other(self) -> FormKind {
        match self {
            FormKind::Income => FormKind::Expense,
            FormKind::Expense => FormKind::Income,
        }
    }
}
