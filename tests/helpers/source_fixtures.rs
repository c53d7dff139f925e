//! Common DELTA fixtures for tests.

/// Seven characters: multistate, numeric and text.
pub const VIOLET_CHARACTERS: &str = "\
*SHOW ~ Violets and allies - character list
#1. <habit>plant <life form>/
   1. annual/
   2. perennial/
#2. leaf blade shape/
   1. cordate/
   2. ovate/
   3. reniform/
#3. leaf blade length/
   cm/
#4. flower colour/ 1. white/ 2. violet/ 3. yellow/
#5. spur length/
   mm/
#6. scent of
   flowers/
   1. absent/
   2. present/
#7. notes on habitat/
";

/// Four items describing the characters above.
pub const VIOLET_ITEMS: &str = "\
*SHOW ~ Violets and allies - item descriptions
#Viola odorata <sweet violet>/ 1,2 2,1 3,2-5(-7) 4,2/1<rarely> 5,(3-)5-7(-8) 6,2
#Viola arvensis <field pansy>/ 1,1 2,2 3,1-3 4,3&1 5,2-4 6,1
#Viola palustris/ 1,2 2,3 3,(1-)2-4 4,2 5,1-2
   6,1 7<bogs and fens>,U
#Viola biflora/ 1,2 2,3 3,1-3 4,3 5,V 6,-
";

pub const VIOLET_SPECS: &str = "\
*SHOW ~ Violets and allies - specifications
*CHARACTER TYPES 3,RN 5,RN
   7,TE
*IMPLICIT VALUES 1,2 6,1
*DEPENDENT CHARACTERS 4,2/3:5-6
";
