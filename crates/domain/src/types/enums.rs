//! Integer-backed enums shared with the backend

use crate::tolerant_int_enum;

tolerant_int_enum! {
    /// Error codes carried by structured error payloads
    pub enum ErrorCode {
        ServerError = 0,
        AuthInvalid = 1,
        AuthExpired = 2,
        NotFound = 3,
        Forbidden = 4,
        ValidationError = 5,
    }
}

tolerant_int_enum! {
    /// Account-wide role
    pub enum UserRole {
        User = 0,
        Admin = 1,
        Moderator = 2,
    }
}

tolerant_int_enum! {
    /// Per-board permission role
    pub enum BoardRole {
        Owner = 0,
        Editor = 1,
        Commenter = 2,
        Viewer = 3,
    }
}

tolerant_int_enum! {
    pub enum BoardVisibility {
        Private = 0,
        Shared = 1,
        Public = 2,
    }
}

tolerant_int_enum! {
    /// Presentation of a board tab
    pub enum TabType {
        Board = 0,
        Calendar = 1,
        Timeline = 2,
        Kanban = 3,
        Whiteboard = 4,
        Chat = 5,
        Metrics = 6,
        Custom = 7,
    }
}

tolerant_int_enum! {
    pub enum CardType {
        Note = 0,
        Task = 1,
        Event = 2,
        Drawing = 3,
    }
}

tolerant_int_enum! {
    /// Workflow state of a card
    pub enum CardStatus {
        Open = 0,
        InProgress = 1,
        Blocked = 2,
        Done = 3,
        Archived = 4,
    }
}
