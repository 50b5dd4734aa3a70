//! Legacy numeric material ids.
//!
//! Block and item names as the server API used them before ids were
//! flattened into namespaced strings. Ids 0 to 197 are blocks, 256 to 431
//! items (426 unused), 2256 to 2267 music discs.

/// Display identifier for ids missing from the table, including 0.
pub const UNKNOWN_MATERIAL: &str = "AIR";

/// `(id, name)`, sorted by id.
#[rustfmt::skip]
static LEGACY_MATERIALS: &[(i32, &str)] = &[
    // Blocks
    (0, "AIR"), (1, "STONE"), (2, "GRASS"), (3, "DIRT"), (4, "COBBLESTONE"), (5, "WOOD"),
    (6, "SAPLING"), (7, "BEDROCK"), (8, "WATER"), (9, "STATIONARY_WATER"), (10, "LAVA"),
    (11, "STATIONARY_LAVA"), (12, "SAND"), (13, "GRAVEL"), (14, "GOLD_ORE"), (15, "IRON_ORE"),
    (16, "COAL_ORE"), (17, "LOG"), (18, "LEAVES"), (19, "SPONGE"), (20, "GLASS"), (21, "LAPIS_ORE"),
    (22, "LAPIS_BLOCK"), (23, "DISPENSER"), (24, "SANDSTONE"), (25, "NOTE_BLOCK"),
    (26, "BED_BLOCK"), (27, "POWERED_RAIL"), (28, "DETECTOR_RAIL"), (29, "PISTON_STICKY_BASE"),
    (30, "WEB"), (31, "LONG_GRASS"), (32, "DEAD_BUSH"), (33, "PISTON_BASE"),
    (34, "PISTON_EXTENSION"), (35, "WOOL"), (36, "PISTON_MOVING_PIECE"), (37, "YELLOW_FLOWER"),
    (38, "RED_ROSE"), (39, "BROWN_MUSHROOM"), (40, "RED_MUSHROOM"), (41, "GOLD_BLOCK"),
    (42, "IRON_BLOCK"), (43, "DOUBLE_STEP"), (44, "STEP"), (45, "BRICK"), (46, "TNT"),
    (47, "BOOKSHELF"), (48, "MOSSY_COBBLESTONE"), (49, "OBSIDIAN"), (50, "TORCH"), (51, "FIRE"),
    (52, "MOB_SPAWNER"), (53, "WOOD_STAIRS"), (54, "CHEST"), (55, "REDSTONE_WIRE"),
    (56, "DIAMOND_ORE"), (57, "DIAMOND_BLOCK"), (58, "WORKBENCH"), (59, "CROPS"), (60, "SOIL"),
    (61, "FURNACE"), (62, "BURNING_FURNACE"), (63, "SIGN_POST"), (64, "WOODEN_DOOR"),
    (65, "LADDER"), (66, "RAILS"), (67, "COBBLESTONE_STAIRS"), (68, "WALL_SIGN"), (69, "LEVER"),
    (70, "STONE_PLATE"), (71, "IRON_DOOR_BLOCK"), (72, "WOOD_PLATE"), (73, "REDSTONE_ORE"),
    (74, "GLOWING_REDSTONE_ORE"), (75, "REDSTONE_TORCH_OFF"), (76, "REDSTONE_TORCH_ON"),
    (77, "STONE_BUTTON"), (78, "SNOW"), (79, "ICE"), (80, "SNOW_BLOCK"), (81, "CACTUS"),
    (82, "CLAY"), (83, "SUGAR_CANE_BLOCK"), (84, "JUKEBOX"), (85, "FENCE"), (86, "PUMPKIN"),
    (87, "NETHERRACK"), (88, "SOUL_SAND"), (89, "GLOWSTONE"), (90, "PORTAL"),
    (91, "JACK_O_LANTERN"), (92, "CAKE_BLOCK"), (93, "DIODE_BLOCK_OFF"), (94, "DIODE_BLOCK_ON"),
    (95, "STAINED_GLASS"), (96, "TRAP_DOOR"), (97, "MONSTER_EGGS"), (98, "SMOOTH_BRICK"),
    (99, "HUGE_MUSHROOM_1"), (100, "HUGE_MUSHROOM_2"), (101, "IRON_FENCE"), (102, "THIN_GLASS"),
    (103, "MELON_BLOCK"), (104, "PUMPKIN_STEM"), (105, "MELON_STEM"), (106, "VINE"),
    (107, "FENCE_GATE"), (108, "BRICK_STAIRS"), (109, "SMOOTH_STAIRS"), (110, "MYCEL"),
    (111, "WATER_LILY"), (112, "NETHER_BRICK"), (113, "NETHER_FENCE"), (114, "NETHER_BRICK_STAIRS"),
    (115, "NETHER_WARTS"), (116, "ENCHANTMENT_TABLE"), (117, "BREWING_STAND"), (118, "CAULDRON"),
    (119, "ENDER_PORTAL"), (120, "ENDER_PORTAL_FRAME"), (121, "ENDER_STONE"), (122, "DRAGON_EGG"),
    (123, "REDSTONE_LAMP_OFF"), (124, "REDSTONE_LAMP_ON"), (125, "WOOD_DOUBLE_STEP"),
    (126, "WOOD_STEP"), (127, "COCOA"), (128, "SANDSTONE_STAIRS"), (129, "EMERALD_ORE"),
    (130, "ENDER_CHEST"), (131, "TRIPWIRE_HOOK"), (132, "TRIPWIRE"), (133, "EMERALD_BLOCK"),
    (134, "SPRUCE_WOOD_STAIRS"), (135, "BIRCH_WOOD_STAIRS"), (136, "JUNGLE_WOOD_STAIRS"),
    (137, "COMMAND"), (138, "BEACON"), (139, "COBBLE_WALL"), (140, "FLOWER_POT"), (141, "CARROT"),
    (142, "POTATO"), (143, "WOOD_BUTTON"), (144, "SKULL"), (145, "ANVIL"), (146, "TRAPPED_CHEST"),
    (147, "GOLD_PLATE"), (148, "IRON_PLATE"), (149, "REDSTONE_COMPARATOR_OFF"),
    (150, "REDSTONE_COMPARATOR_ON"), (151, "DAYLIGHT_DETECTOR"), (152, "REDSTONE_BLOCK"),
    (153, "QUARTZ_ORE"), (154, "HOPPER"), (155, "QUARTZ_BLOCK"), (156, "QUARTZ_STAIRS"),
    (157, "ACTIVATOR_RAIL"), (158, "DROPPER"), (159, "STAINED_CLAY"), (160, "STAINED_GLASS_PANE"),
    (161, "LEAVES_2"), (162, "LOG_2"), (163, "ACACIA_STAIRS"), (164, "DARK_OAK_STAIRS"),
    (165, "SLIME_BLOCK"), (166, "BARRIER"), (167, "IRON_TRAPDOOR"), (168, "PRISMARINE"),
    (169, "SEA_LANTERN"), (170, "HAY_BLOCK"), (171, "CARPET"), (172, "HARD_CLAY"),
    (173, "COAL_BLOCK"), (174, "PACKED_ICE"), (175, "DOUBLE_PLANT"), (176, "STANDING_BANNER"),
    (177, "WALL_BANNER"), (178, "DAYLIGHT_DETECTOR_INVERTED"), (179, "RED_SANDSTONE"),
    (180, "RED_SANDSTONE_STAIRS"), (181, "DOUBLE_STONE_SLAB2"), (182, "STONE_SLAB2"),
    (183, "SPRUCE_FENCE_GATE"), (184, "BIRCH_FENCE_GATE"), (185, "JUNGLE_FENCE_GATE"),
    (186, "DARK_OAK_FENCE_GATE"), (187, "ACACIA_FENCE_GATE"), (188, "SPRUCE_FENCE"),
    (189, "BIRCH_FENCE"), (190, "JUNGLE_FENCE"), (191, "DARK_OAK_FENCE"), (192, "ACACIA_FENCE"),
    (193, "SPRUCE_DOOR"), (194, "BIRCH_DOOR"), (195, "JUNGLE_DOOR"), (196, "ACACIA_DOOR"),
    (197, "DARK_OAK_DOOR"),
    // Items
    (256, "IRON_SPADE"), (257, "IRON_PICKAXE"), (258, "IRON_AXE"), (259, "FLINT_AND_STEEL"),
    (260, "APPLE"), (261, "BOW"), (262, "ARROW"), (263, "COAL"), (264, "DIAMOND"),
    (265, "IRON_INGOT"), (266, "GOLD_INGOT"), (267, "IRON_SWORD"), (268, "WOOD_SWORD"),
    (269, "WOOD_SPADE"), (270, "WOOD_PICKAXE"), (271, "WOOD_AXE"), (272, "STONE_SWORD"),
    (273, "STONE_SPADE"), (274, "STONE_PICKAXE"), (275, "STONE_AXE"), (276, "DIAMOND_SWORD"),
    (277, "DIAMOND_SPADE"), (278, "DIAMOND_PICKAXE"), (279, "DIAMOND_AXE"), (280, "STICK"),
    (281, "BOWL"), (282, "MUSHROOM_SOUP"), (283, "GOLD_SWORD"), (284, "GOLD_SPADE"),
    (285, "GOLD_PICKAXE"), (286, "GOLD_AXE"), (287, "STRING"), (288, "FEATHER"), (289, "SULPHUR"),
    (290, "WOOD_HOE"), (291, "STONE_HOE"), (292, "IRON_HOE"), (293, "DIAMOND_HOE"),
    (294, "GOLD_HOE"), (295, "SEEDS"), (296, "WHEAT"), (297, "BREAD"), (298, "LEATHER_HELMET"),
    (299, "LEATHER_CHESTPLATE"), (300, "LEATHER_LEGGINGS"), (301, "LEATHER_BOOTS"),
    (302, "CHAINMAIL_HELMET"), (303, "CHAINMAIL_CHESTPLATE"), (304, "CHAINMAIL_LEGGINGS"),
    (305, "CHAINMAIL_BOOTS"), (306, "IRON_HELMET"), (307, "IRON_CHESTPLATE"),
    (308, "IRON_LEGGINGS"), (309, "IRON_BOOTS"), (310, "DIAMOND_HELMET"),
    (311, "DIAMOND_CHESTPLATE"), (312, "DIAMOND_LEGGINGS"), (313, "DIAMOND_BOOTS"),
    (314, "GOLD_HELMET"), (315, "GOLD_CHESTPLATE"), (316, "GOLD_LEGGINGS"), (317, "GOLD_BOOTS"),
    (318, "FLINT"), (319, "PORK"), (320, "GRILLED_PORK"), (321, "PAINTING"), (322, "GOLDEN_APPLE"),
    (323, "SIGN"), (324, "WOOD_DOOR"), (325, "BUCKET"), (326, "WATER_BUCKET"), (327, "LAVA_BUCKET"),
    (328, "MINECART"), (329, "SADDLE"), (330, "IRON_DOOR"), (331, "REDSTONE"), (332, "SNOW_BALL"),
    (333, "BOAT"), (334, "LEATHER"), (335, "MILK_BUCKET"), (336, "CLAY_BRICK"), (337, "CLAY_BALL"),
    (338, "SUGAR_CANE"), (339, "PAPER"), (340, "BOOK"), (341, "SLIME_BALL"),
    (342, "STORAGE_MINECART"), (343, "POWERED_MINECART"), (344, "EGG"), (345, "COMPASS"),
    (346, "FISHING_ROD"), (347, "WATCH"), (348, "GLOWSTONE_DUST"), (349, "RAW_FISH"),
    (350, "COOKED_FISH"), (351, "INK_SACK"), (352, "BONE"), (353, "SUGAR"), (354, "CAKE"),
    (355, "BED"), (356, "DIODE"), (357, "COOKIE"), (358, "MAP"), (359, "SHEARS"), (360, "MELON"),
    (361, "PUMPKIN_SEEDS"), (362, "MELON_SEEDS"), (363, "RAW_BEEF"), (364, "COOKED_BEEF"),
    (365, "RAW_CHICKEN"), (366, "COOKED_CHICKEN"), (367, "ROTTEN_FLESH"), (368, "ENDER_PEARL"),
    (369, "BLAZE_ROD"), (370, "GHAST_TEAR"), (371, "GOLD_NUGGET"), (372, "NETHER_STALK"),
    (373, "POTION"), (374, "GLASS_BOTTLE"), (375, "SPIDER_EYE"), (376, "FERMENTED_SPIDER_EYE"),
    (377, "BLAZE_POWDER"), (378, "MAGMA_CREAM"), (379, "BREWING_STAND_ITEM"),
    (380, "CAULDRON_ITEM"), (381, "EYE_OF_ENDER"), (382, "SPECKLED_MELON"), (383, "MONSTER_EGG"),
    (384, "EXP_BOTTLE"), (385, "FIREBALL"), (386, "BOOK_AND_QUILL"), (387, "WRITTEN_BOOK"),
    (388, "EMERALD"), (389, "ITEM_FRAME"), (390, "FLOWER_POT_ITEM"), (391, "CARROT_ITEM"),
    (392, "POTATO_ITEM"), (393, "BAKED_POTATO"), (394, "POISONOUS_POTATO"), (395, "EMPTY_MAP"),
    (396, "GOLDEN_CARROT"), (397, "SKULL_ITEM"), (398, "CARROT_STICK"), (399, "NETHER_STAR"),
    (400, "PUMPKIN_PIE"), (401, "FIREWORK"), (402, "FIREWORK_CHARGE"), (403, "ENCHANTED_BOOK"),
    (404, "REDSTONE_COMPARATOR"), (405, "NETHER_BRICK_ITEM"), (406, "QUARTZ"),
    (407, "EXPLOSIVE_MINECART"), (408, "HOPPER_MINECART"), (409, "PRISMARINE_SHARD"),
    (410, "PRISMARINE_CRYSTALS"), (411, "RABBIT"), (412, "COOKED_RABBIT"), (413, "RABBIT_STEW"),
    (414, "RABBIT_FOOT"), (415, "RABBIT_HIDE"), (416, "ARMOR_STAND"), (417, "IRON_BARDING"),
    (418, "GOLD_BARDING"), (419, "DIAMOND_BARDING"), (420, "LEASH"), (421, "NAME_TAG"),
    (422, "COMMAND_MINECART"), (423, "MUTTON"), (424, "COOKED_MUTTON"), (425, "BANNER"),
    (427, "SPRUCE_DOOR_ITEM"), (428, "BIRCH_DOOR_ITEM"), (429, "JUNGLE_DOOR_ITEM"),
    (430, "ACACIA_DOOR_ITEM"), (431, "DARK_OAK_DOOR_ITEM"),
    // Records
    (2256, "GOLD_RECORD"), (2257, "GREEN_RECORD"), (2258, "RECORD_3"), (2259, "RECORD_4"),
    (2260, "RECORD_5"), (2261, "RECORD_6"), (2262, "RECORD_7"), (2263, "RECORD_8"),
    (2264, "RECORD_9"), (2265, "RECORD_10"), (2266, "RECORD_11"), (2267, "RECORD_12"),
];

/// Looks up the material name of a legacy numeric id.
#[must_use]
pub fn material_name(id: i32) -> Option<&'static str> {
    LEGACY_MATERIALS
        .binary_search_by_key(&id, |&(k, _)| k)
        .ok()
        .map(|i| LEGACY_MATERIALS[i].1)
}

/// Display identifier of a legacy numeric id, [`UNKNOWN_MATERIAL`] when unknown.
#[must_use]
pub fn display_identifier(id: i32) -> &'static str {
    material_name(id).unwrap_or(UNKNOWN_MATERIAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(LEGACY_MATERIALS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_table_ranges() {
        assert_eq!(LEGACY_MATERIALS.len(), 198 + 170 + 5 + 12);
        assert_eq!(LEGACY_MATERIALS.first(), Some(&(0, "AIR")));
        assert_eq!(LEGACY_MATERIALS.last(), Some(&(2267, "RECORD_12")));
    }

    #[test]
    fn test_metadata_relevant_ids() {
        assert_eq!(material_name(298), Some("LEATHER_HELMET"));
        assert_eq!(material_name(301), Some("LEATHER_BOOTS"));
        assert_eq!(material_name(386), Some("BOOK_AND_QUILL"));
        assert_eq!(material_name(387), Some("WRITTEN_BOOK"));
        assert_eq!(material_name(397), Some("SKULL_ITEM"));
        assert_eq!(material_name(403), Some("ENCHANTED_BOOK"));
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        assert_eq!(material_name(426), None);
        assert_eq!(display_identifier(426), UNKNOWN_MATERIAL);
        assert_eq!(display_identifier(-5), UNKNOWN_MATERIAL);
        assert_eq!(display_identifier(32000), UNKNOWN_MATERIAL);
        assert_eq!(display_identifier(0), UNKNOWN_MATERIAL);
        assert_eq!(display_identifier(1), "STONE");
    }
}
