/// ----- ELEVATOR -----
/// State holder for a single car in the fleet. Only counters live here;
/// serialization of concurrent access is the owner's job.

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Elevator {
    id: u8,
    floor: u8,
    capacity: u8,
    load: u8,
}

/// Read-only snapshot handed to renderers.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorStatus {
    pub id: u8,
    pub floor: u8,
    pub load: u8,
    pub capacity: u8,
}

impl Elevator {
    pub fn new(id: u8, capacity: u8) -> Self {
        Elevator {
            id,
            floor: 0,
            capacity,
            load: 0,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn load(&self) -> u8 {
        self.load
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Unchecked: the floor is validated when the request is submitted.
    pub fn move_to(&mut self, floor: u8) {
        self.floor = floor;
    }

    pub fn try_board(&mut self) -> bool {
        if self.load < self.capacity {
            self.load += 1;
            return true
        }
        false
    }

    pub fn alight(&mut self) {
        if self.load > 0 {
            self.load -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.floor = 0;
        self.load = 0;
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            floor: self.floor,
            load: self.load,
            capacity: self.capacity,
        }
    }
}
