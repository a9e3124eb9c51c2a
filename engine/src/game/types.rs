use super::geometry::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    /// Unit offset of one step in this direction. The y axis grows downwards.
    pub fn offset(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0, -1),
            Direction::Down => Vec2::new(0, 1),
            Direction::Left => Vec2::new(-1, 0),
            Direction::Right => Vec2::new(1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Initializing,
    Playing,
    Dying,
    Dead,
    PostDead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Common,
    Golden,
    Rainbow,
    Umami,
    Rejuvenation,
    Danger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Invincibility,
    NotGrowing,
    Rejuvenation,
    Shrinking,
}

impl EffectKind {
    pub const COUNT: usize = 4;

    pub const ALL: [EffectKind; EffectKind::COUNT] = [
        EffectKind::Invincibility,
        EffectKind::NotGrowing,
        EffectKind::Rejuvenation,
        EffectKind::Shrinking,
    ];

    pub fn index(self) -> usize {
        match self {
            EffectKind::Invincibility => 0,
            EffectKind::NotGrowing => 1,
            EffectKind::Rejuvenation => 2,
            EffectKind::Shrinking => 3,
        }
    }
}
