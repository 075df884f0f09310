pub mod boneyard;
pub mod hand;
pub mod legality;
pub mod player;
pub mod stack;
pub mod tile;
