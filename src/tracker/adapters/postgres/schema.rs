//! Diesel schema for employee and task persistence.

diesel::table! {
    /// Employee records.
    employees (id) {
        /// Employee identifier.
        id -> Uuid,
        /// Employee full name.
        #[max_length = 255]
        full_name -> Varchar,
        /// Employee position.
        #[max_length = 255]
        position -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records forming a parent/child forest.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Optional parent task, cascading on delete.
        parent_task_id -> Nullable<Uuid>,
        /// Optional executor, cascading on delete.
        executor_id -> Nullable<Uuid>,
        /// Due-by timestamp.
        period -> Timestamptz,
        /// Status label.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
