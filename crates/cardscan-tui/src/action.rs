use cardscan_core::DocumentKind;

/// Everything the UI can be asked to do, independent of the key that did it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(DocumentKind),
    OpenFilePicker,
    StartPathInput,
    Extract,
    Copy,
    Download,
    Reset,
    ToggleHelp,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    DrillIn,
    NavigateBack,
    /// Text dropped or pasted into the terminal.
    Dropped(String),
    TextInput(char),
    TextBackspace,
    TextConfirm,
    TextCancel,
    ClickAt(u16, u16),
    Resize(u16, u16),
    Tick,
    None,
}
