/// ----- CLOSEST ELEVATOR -----
/// This stateless module picks which elevator serves a request. It takes
/// the current floor of every elevator in fleet order and returns the
/// index of the one nearest the target floor. Only a strictly closer
/// elevator replaces the candidate, so ties go to the lowest index.

pub fn closest_elevator(floors: &[u8], target_floor: u8) -> Option<usize> {
    let distance = |floor: u8| floor.abs_diff(target_floor);
    let (mut closest, mut closest_floor) = (0, *floors.first()?);
    for (index, &floor) in floors.iter().enumerate().skip(1) {
        if distance(floor) < distance(closest_floor) {
            closest = index;
            closest_floor = floor;
        }
    }
    Some(closest)
}
