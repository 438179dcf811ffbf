//! Corner: the tabletop assembly turned 45° about +Y. No geometry of its own.

use super::{tabletop, Assembly};
use crate::cfg::CORNER_ROTATION_RAD;
use crate::stand::types::{ArchetypeExtras, StandSpec};

pub(crate) fn assemble(stand: &StandSpec) -> Assembly {
    let mut asm = tabletop::assemble(stand);
    asm.root.transform = asm.root.transform.rotated_y(CORNER_ROTATION_RAD);
    asm.extras = ArchetypeExtras::Corner {
        rotation_deg: CORNER_ROTATION_RAD.to_degrees(),
    };
    asm
}
