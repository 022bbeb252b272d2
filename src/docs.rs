use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::attendance::{MarkAttendanceReq, RegisterResponse, StatusEdit};
use crate::api::department::{CreateDepartment, DepartmentView};
use crate::api::section::CreateSection;
use crate::api::shift::CreateShift;
use crate::api::user::{CreateUser, UserView};
use crate::api::worker::{CreateWorker, ImportWorker, SetActive, TransferWorker};
use crate::core::grid::{GridRow, MonthlyGrid};
use crate::core::reconcile::Submission;
use crate::core::report::{DailySummary, MonthlyReport, StatusTotals, WorkerMonthly};
use crate::model::attendance::AttendanceRecord;
use crate::model::department::Department;
use crate::model::section::Section;
use crate::model::shift::Shift;
use crate::model::status::AttendanceStatus;
use crate::model::worker::Worker;
use crate::models::{LoginReqDto, LoginResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rollcall API",
        version = "1.0.0",
        description = r#"
## Company Attendance System

Role-gated attendance tracking: admins manage sections, departments, shifts
and users; supervisors mark daily attendance and transfer workers; HR runs
read-only reports.

### Key Features
- **Organization**: sections, departments, shifts and user accounts
- **Workers**: single and bulk creation, transfer, activation toggle
- **Attendance**: daily marking with same-day reconciliation, register view
  with inline corrections
- **Reports**: daily breakdowns, monthly per-worker statistics, worker × day
  presence grids, CSV export of every table

### Security
All routes except login require a **JWT Bearer token**; role checks are
enforced per operation.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::section::list_sections,
        crate::api::section::create_section,
        crate::api::section::clear_sections,

        crate::api::department::list_departments,
        crate::api::department::create_department,
        crate::api::department::clear_departments,

        crate::api::shift::list_shifts,
        crate::api::shift::create_shift,

        crate::api::user::list_users,
        crate::api::user::create_user,

        crate::api::worker::list_workers,
        crate::api::worker::create_worker,
        crate::api::worker::import_workers,
        crate::api::worker::set_worker_active,
        crate::api::worker::transfer_worker,
        crate::api::worker::delete_worker,
        crate::api::worker::clear_workers,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::attendance_register,
        crate::api::attendance::edit_statuses,
        crate::api::attendance::clear_attendance,

        crate::api::report::daily_report,
        crate::api::report::monthly,
        crate::api::report::grid,

        crate::api::export::attendance_csv,
        crate::api::export::monthly_csv,
        crate::api::export::grid_csv,
        crate::api::export::workers_csv,
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            Section,
            CreateSection,
            Department,
            CreateDepartment,
            DepartmentView,
            Shift,
            CreateShift,
            UserView,
            CreateUser,
            Worker,
            CreateWorker,
            ImportWorker,
            SetActive,
            TransferWorker,
            AttendanceRecord,
            AttendanceStatus,
            Submission,
            MarkAttendanceReq,
            RegisterResponse,
            StatusEdit,
            DailySummary,
            WorkerMonthly,
            StatusTotals,
            MonthlyReport,
            GridRow,
            MonthlyGrid
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication"),
        (name = "Sections", description = "Section management"),
        (name = "Departments", description = "Department management"),
        (name = "Shifts", description = "Shift management"),
        (name = "Users", description = "User account management"),
        (name = "Workers", description = "Worker management"),
        (name = "Attendance", description = "Daily attendance marking and register"),
        (name = "Reports", description = "Daily and monthly reporting"),
        (name = "Export", description = "CSV downloads"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
