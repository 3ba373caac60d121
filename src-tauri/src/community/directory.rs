use super::types::{CommunityDirectory, CommunityEvent, CommunityGroup};

fn group(name: &str, members: u32, description: &str) -> CommunityGroup {
    CommunityGroup {
        name: name.to_string(),
        members,
        description: description.to_string(),
    }
}

fn event(name: &str, date: &str, location: &str, description: &str) -> CommunityEvent {
    CommunityEvent {
        name: name.to_string(),
        date: date.to_string(),
        location: location.to_string(),
        description: description.to_string(),
    }
}

pub fn community_directory() -> CommunityDirectory {
    CommunityDirectory {
        groups: vec![
            group(
                "Zero Waste India",
                2145,
                "Learn how to go zero-waste in your home and community across India.",
            ),
            group(
                "Urban Gardening Mumbai",
                1342,
                "Organic gardening on balconies, terraces, and community spaces in Mumbai.",
            ),
        ],
        events: vec![
            event(
                "Yamuna River Cleanup",
                "May 15, 2025",
                "Delhi",
                "Join us to clean up the Yamuna riverbank and raise awareness about water pollution.",
            ),
            event(
                "Eco-Friendly Living Workshop",
                "May 22, 2025",
                "Bangalore",
                "Practical workshop on composting, water conservation, and zero-waste living.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_contents() {
        let dir = community_directory();
        assert_eq!(dir.groups.len(), 2);
        assert_eq!(dir.events.len(), 2);
        assert_eq!(dir.groups[0].members, 2145);
        assert_eq!(dir.events[1].location, "Bangalore");
    }
}
