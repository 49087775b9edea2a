//! Diesel schema for board persistence.

diesel::table! {
    /// Task records owned by individual users.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identity.
        owner_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due instant.
        due_date -> Nullable<Timestamptz>,
        /// Priority (`LOW`, `MEDIUM`, `HIGH`).
        #[max_length = 16]
        priority -> Varchar,
        /// Optional category.
        category -> Nullable<Text>,
        /// Legacy completion flag.
        completed -> Bool,
        /// Workflow status (`TODO`, `IN_PROGRESS`, `DONE`).
        #[max_length = 16]
        status -> Varchar,
        /// Position within the status column.
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared tag vocabulary.
    tags (id) {
        /// Tag identifier.
        id -> Uuid,
        /// Tag name.
        #[max_length = 255]
        name -> Varchar,
        /// `#RRGGBB` color.
        #[max_length = 7]
        color -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task-tag associations.
    task_tags (task_id, tag_id) {
        /// Associated task.
        task_id -> Uuid,
        /// Associated tag.
        tag_id -> Uuid,
    }
}
