use crate::model::{
    employee::RosterRow,
    supply::{Bin, SupplyItem},
};
use crate::models::{AttendanceAck, StationForm, VolumeForm};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Station Operations API",
        version = "0.1.0",
        description = r#"
## Station Operations Dashboard

Server-rendered dashboard for one station at a time.

### Pages
- **Dashboard**: late and absent employees, supplies running low, bins filling up
- **Employees**: daily attendance, the last week of check-ins, running on-time/late/absent counts
- **Supplies & Bins**: daily volumes with in-place editing, plus the month's raw rows
- **Messages**

### Station
The active station is kept per client in the `station` cookie, set through `POST /set-station`.
Station names match case-insensitively.
"#,
    ),
    paths(
        crate::api::station::index,
        crate::api::station::set_station,

        crate::api::dashboard::dashboard,

        crate::api::employee::list_employees,
        crate::api::employee::mark_attendance,

        crate::api::supplies::supplies,
        crate::api::supplies::update_volume,

        crate::api::messages::messages
    ),
    components(
        schemas(
            StationForm,
            VolumeForm,
            AttendanceAck,
            RosterRow,
            SupplyItem,
            Bin
        )
    ),
    tags(
        (name = "Station", description = "Station selection"),
        (name = "Dashboard", description = "Daily exceptions"),
        (name = "Employee", description = "Attendance pages and marking"),
        (name = "Supplies", description = "Supply and bin volumes"),
        (name = "Messages", description = "Messages page"),
    )
)]
pub struct ApiDoc;
