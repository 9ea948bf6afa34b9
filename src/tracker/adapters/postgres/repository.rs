//! `PostgreSQL` repository implementation for employee and task storage.

use super::{
    models::{EmployeeRow, NewEmployeeRow, NewTaskRow, TaskRow},
    schema::{employees, tasks},
};
use crate::tracker::{
    domain::{
        Employee, EmployeeId, FullName, PersistedEmployeeData, PersistedTaskData, Position, Task,
        TaskId, TaskName, TaskStatus,
    },
    ports::{TrackerRepository, TrackerRepositoryError, TrackerRepositoryResult, TrackerSnapshot},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by tracker adapters.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

const PARENT_TASK_FK: &str = "fk_tasks_parent_task";
const EXECUTOR_FK: &str = "fk_tasks_executor";

/// `PostgreSQL`-backed tracker repository.
#[derive(Debug, Clone)]
pub struct PostgresTrackerRepository {
    pool: TrackerPgPool,
}

impl PostgresTrackerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool of at most `pool_size` connections to `database_url`.
    ///
    /// Blocks until the pool has opened its initial connections.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::Persistence`] when the database is
    /// unreachable.
    pub fn connect(database_url: &str, pool_size: u32) -> TrackerRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(TrackerRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TrackerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TrackerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TrackerRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TrackerRepositoryError::persistence)?
    }
}

#[async_trait]
impl TrackerRepository for PostgresTrackerRepository {
    async fn store_employee(&self, employee: &Employee) -> TrackerRepositoryResult<()> {
        let employee_id = employee.id();
        let new_row = to_new_employee_row(employee);

        self.run_blocking(move |connection| {
            diesel::insert_into(employees::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TrackerRepositoryError::DuplicateEmployee(employee_id)
                    }
                    _ => TrackerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_employee(&self, employee: &Employee) -> TrackerRepositoryResult<()> {
        let employee_id = employee.id();
        let full_name = employee.full_name().as_str().to_owned();
        let position = employee.position().as_str().to_owned();
        let updated_at = employee.updated_at();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                employees::table.filter(employees::id.eq(employee_id.into_inner())),
            )
            .set((
                employees::full_name.eq(&full_name),
                employees::position.eq(&position),
                employees::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(TrackerRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TrackerRepositoryError::EmployeeNotFound(employee_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_employee(&self, id: EmployeeId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(employees::table.filter(employees::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TrackerRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(TrackerRepositoryError::EmployeeNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_employee(&self, id: EmployeeId) -> TrackerRepositoryResult<Option<Employee>> {
        self.run_blocking(move |connection| {
            let row = employees::table
                .filter(employees::id.eq(id.into_inner()))
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?;
            row.map(row_to_employee).transpose()
        })
        .await
    }

    async fn list_employees(&self) -> TrackerRepositoryResult<Vec<Employee>> {
        self.run_blocking(move |connection| {
            let rows = load_employee_rows(connection).map_err(TrackerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_employee).collect()
        })
        .await
    }

    async fn store_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let task_id = task.id();
        let references = TaskReferences::of(task);
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TrackerRepositoryError::DuplicateTask(task_id)
                    }
                    other => references.map_write_error(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let task_id = task.id();
        let references = TaskReferences::of(task);
        let row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set((
                        tasks::name.eq(row.name),
                        tasks::description.eq(row.description),
                        tasks::parent_task_id.eq(row.parent_task_id),
                        tasks::executor_id.eq(row.executor_id),
                        tasks::period.eq(row.period),
                        tasks::status.eq(row.status),
                        tasks::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(|err| references.map_write_error(err))?;

            if updated_count == 0 {
                return Err(TrackerRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(TrackerRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks(&self) -> TrackerRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = load_task_rows(connection).map_err(TrackerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn snapshot(&self) -> TrackerRepositoryResult<TrackerSnapshot> {
        self.run_blocking(move |connection| {
            // Both reads must observe the same database state, otherwise a
            // task could reference a parent reassigned in between.
            let (employee_rows, task_rows) = connection
                .build_transaction()
                .repeatable_read()
                .read_only()
                .run(|tx| {
                    let employee_rows = load_employee_rows(tx)?;
                    let task_rows = load_task_rows(tx)?;
                    Ok::<_, DieselError>((employee_rows, task_rows))
                })
                .map_err(TrackerRepositoryError::persistence)?;

            let employees = employee_rows
                .into_iter()
                .map(row_to_employee)
                .collect::<TrackerRepositoryResult<Vec<_>>>()?;
            let tasks = task_rows
                .into_iter()
                .map(row_to_task)
                .collect::<TrackerRepositoryResult<Vec<_>>>()?;
            tracing::debug!(
                employees = employees.len(),
                tasks = tasks.len(),
                "loaded tracker snapshot"
            );
            Ok(TrackerSnapshot { employees, tasks })
        })
        .await
    }
}

/// References carried by a task write, used to name the dangling side of a
/// foreign-key violation.
#[derive(Debug, Clone, Copy)]
struct TaskReferences {
    parent_task: Option<TaskId>,
    executor: Option<EmployeeId>,
}

impl TaskReferences {
    const fn of(task: &Task) -> Self {
        Self {
            parent_task: task.parent_task(),
            executor: task.executor(),
        }
    }

    fn map_write_error(self, err: DieselError) -> TrackerRepositoryError {
        let violated = match &err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                info.constraint_name().map(ToOwned::to_owned)
            }
            _ => None,
        };
        match (violated.as_deref(), self.parent_task, self.executor) {
            (Some(PARENT_TASK_FK), Some(parent), _) => {
                TrackerRepositoryError::MissingParentTask(parent)
            }
            (Some(EXECUTOR_FK), _, Some(executor)) => {
                TrackerRepositoryError::MissingExecutor(executor)
            }
            _ => TrackerRepositoryError::persistence(err),
        }
    }
}

fn load_employee_rows(connection: &mut PgConnection) -> Result<Vec<EmployeeRow>, DieselError> {
    // `full_name` is declared with the "C" collation, so this is byte order.
    employees::table
        .order((employees::full_name.asc(), employees::id.asc()))
        .select(EmployeeRow::as_select())
        .load::<EmployeeRow>(connection)
}

fn load_task_rows(connection: &mut PgConnection) -> Result<Vec<TaskRow>, DieselError> {
    tasks::table
        .order(tasks::id.asc())
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)
}

fn to_new_employee_row(employee: &Employee) -> NewEmployeeRow {
    NewEmployeeRow {
        id: employee.id().into_inner(),
        full_name: employee.full_name().as_str().to_owned(),
        position: employee.position().as_str().to_owned(),
        created_at: employee.created_at(),
        updated_at: employee.updated_at(),
    }
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        name: task.name().as_str().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        parent_task_id: task.parent_task().map(TaskId::into_inner),
        executor_id: task.executor().map(EmployeeId::into_inner),
        period: task.period(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_employee(row: EmployeeRow) -> TrackerRepositoryResult<Employee> {
    let EmployeeRow {
        id,
        full_name,
        position,
        created_at,
        updated_at,
    } = row;

    let data = PersistedEmployeeData {
        id: EmployeeId::from_uuid(id),
        full_name: FullName::new(full_name).map_err(TrackerRepositoryError::persistence)?,
        position: Position::new(position).map_err(TrackerRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Employee::from_persisted(data))
}

fn row_to_task(row: TaskRow) -> TrackerRepositoryResult<Task> {
    let TaskRow {
        id,
        name,
        description,
        parent_task_id,
        executor_id,
        period,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        name: TaskName::new(name).map_err(TrackerRepositoryError::persistence)?,
        description,
        parent_task: parent_task_id.map(TaskId::from_uuid),
        executor: executor_id.map(EmployeeId::from_uuid),
        period,
        status: TaskStatus::try_from(status.as_str()).map_err(TrackerRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
