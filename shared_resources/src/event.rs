/// Notifications published to whoever renders the simulation.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Event {
    Requested { floor: u8 },
    Moving { elevator_id: u8, target_floor: u8 },
    Arrived { elevator_id: u8, floor: u8 },
    CapacityExceeded { elevator_id: u8 },
    Reset,
}

impl Event {
    pub fn as_string(&self) -> String {
        match self {
            Event::Requested { floor } => format!("Requested Floor: {}", floor),
            Event::Moving { elevator_id, target_floor } => {
                format!("Elevator {} moving to Floor: {}", elevator_id, target_floor)
            },
            Event::Arrived { elevator_id, floor } => {
                format!("Elevator {} has arrived at Floor: {}", elevator_id, floor)
            },
            Event::CapacityExceeded { elevator_id } => {
                format!("Elevator {} is at full capacity.", elevator_id)
            },
            Event::Reset => String::from("Simulation reset"),
        }
    }
}
